//! Shared tracking and counting state.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::counter::{CountSnapshot, CounterStore, Rollup};
use crate::error::Result;
use crate::tracker::{Detection, StepResult, Track, TrackAssociator, TrackerConfig};

struct MonitorInner {
    associator: TrackAssociator,
    counters: CounterStore,
}

/// Track set and counters behind one lock.
///
/// Cloning yields another handle to the same state. The frame loop is the
/// only caller of [`Monitor::observe`]; readers take snapshots. The lock is
/// held for one step plus one count update, or for one copy.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<Mutex<MonitorInner>>,
    config: Arc<TrackerConfig>,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl Monitor {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MonitorInner {
                associator: TrackAssociator::new(config.clone()),
                counters: CounterStore::new(),
            })),
            config: Arc::new(config),
        }
    }

    pub fn try_new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Feed one frame's detections through the tracker and refresh counts.
    pub fn observe(&self, detections: &[Detection]) -> StepResult {
        let mut inner = self.inner.lock();
        let step = inner.associator.step(detections);
        inner.counters.apply(&step);
        step
    }

    pub fn snapshot(&self) -> CountSnapshot {
        self.inner.lock().counters.snapshot()
    }

    /// Copy of the live tracks, for drawing overlays.
    pub fn live_tracks(&self) -> Vec<Track> {
        self.inner.lock().associator.tracks().to_vec()
    }

    /// Number of frames observed so far.
    pub fn frame_id(&self) -> u64 {
        self.inner.lock().associator.frame_id()
    }

    /// Capture live counts for `period_key` without touching any state.
    pub fn rollup(&self, period_key: impl Into<String>) -> Rollup {
        self.inner.lock().counters.rollup(period_key)
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("config", &self.config)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
