//! TrackerPipeline for combining detection with tracking and counting.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::tracker::{StepResult, TrackerConfig};

use super::{DetectionSource, Monitor};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Detector calls slower than this drop the frame instead of stepping
    /// the tracker. `None` waits for the detector however long it takes.
    pub detect_budget: Option<Duration>,
}

/// What happened to a frame handed to [`TrackerPipeline::process_frame`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The tracker advanced one step.
    Tracked(StepResult),
    /// The detector overran its budget; tracker state is untouched.
    Dropped { elapsed: Duration },
}

impl FrameOutcome {
    pub fn step(&self) -> Option<&StepResult> {
        match self {
            FrameOutcome::Tracked(step) => Some(step),
            FrameOutcome::Dropped { .. } => None,
        }
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, FrameOutcome::Dropped { .. })
    }
}

/// Couples a `DetectionSource` with a shared [`Monitor`].
///
/// The detector runs outside the monitor's lock, so readers are never
/// held up by inference.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    monitor: Monitor,
    config: PipelineConfig,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    pub fn new(detector: D, monitor: Monitor, config: PipelineConfig) -> Self {
        Self {
            detector,
            monitor,
            config,
        }
    }

    /// Pipeline with a fresh monitor and no detection budget.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(
            detector,
            Monitor::new(TrackerConfig::default()),
            PipelineConfig::default(),
        )
    }

    /// Detect on one frame and advance the tracker.
    ///
    /// A detector error counts as a frame with no detections.
    pub fn process_frame(&mut self, input: &[u8], width: u32, height: u32) -> FrameOutcome {
        let started = Instant::now();
        let detections = match self.detector.detect(input, width, height) {
            Ok(detections) => detections,
            Err(err) => {
                warn!(error = %err, "detector failed, treating frame as empty");
                Vec::new()
            }
        };
        let elapsed = started.elapsed();

        if let Some(budget) = self.config.detect_budget.filter(|&b| elapsed > b) {
            warn!(?elapsed, ?budget, "detector overran budget, dropping frame");
            return FrameOutcome::Dropped { elapsed };
        }

        FrameOutcome::Tracked(self.monitor.observe(&detections))
    }

    /// Handle to the shared state, for readers.
    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }
}
