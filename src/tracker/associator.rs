//! Frame-to-frame association of detections into persistent tracks.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, TrackerError};
use crate::tracker::mask_class::MaskClass;
use crate::tracker::matching::{self, AssignmentResult, Detection};
use crate::tracker::rect::{Rect, iou_batch};
use crate::tracker::track::Track;

/// How detections are paired with tracks each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    /// Detection order, best remaining track per detection
    #[default]
    Greedy,
    /// Minimum total `1 - IoU` cost over the whole frame
    Optimal,
}

/// Configuration for the [`TrackAssociator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// A detection only continues a track when their IoU is strictly above this
    pub iou_threshold: f32,
    /// Tracks missing more consecutive frames than this are evicted
    pub max_missed: u32,
    /// Detections scoring below this are ignored
    pub min_score: f32,
    pub assignment: AssignmentStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.3,
            max_missed: 10,
            min_score: 0.0,
            assignment: AssignmentStrategy::Greedy,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(TrackerError::InvalidIouThreshold(self.iou_threshold));
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(TrackerError::InvalidMinScore(self.min_score));
        }
        Ok(())
    }
}

/// Result of a single [`TrackAssociator::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepResult {
    /// Frame number this step produced, starting at 1
    pub frame_id: u64,
    /// Every live track after the step, in creation order
    pub updated_tracks: Vec<Track>,
    /// Tracks created this frame (also present in `updated_tracks`)
    pub new_tracks: Vec<Track>,
    /// Tracks removed this frame
    pub evicted: Vec<Track>,
}

/// Greedy IoU tracker.
///
/// Owns the live track set. Not synchronised: callers needing shared access
/// go through [`crate::Monitor`].
#[derive(Debug, Clone)]
pub struct TrackAssociator {
    tracks: Vec<Track>,
    next_id: u64,
    frame_id: u64,
    config: TrackerConfig,
}

impl Default for TrackAssociator {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl TrackAssociator {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
            frame_id: 0,
            config,
        }
    }

    /// Like [`TrackAssociator::new`] but rejects out-of-range thresholds.
    pub fn try_new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Advance one frame with that frame's detections (possibly none).
    pub fn step(&mut self, detections: &[Detection]) -> StepResult {
        self.frame_id += 1;
        let frame_id = self.frame_id;

        let detections: Vec<&Detection> = detections
            .iter()
            .filter(|d| d.score >= self.config.min_score)
            .collect();

        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = self.associate(&detections);

        for (itrack, idet) in matches {
            self.tracks[itrack].update(detections[idet], frame_id);
        }

        for itrack in unmatched_tracks {
            self.tracks[itrack].mark_missed();
        }

        let max_missed = self.config.max_missed;
        let (mut live, mut evicted): (Vec<Track>, Vec<Track>) = self
            .tracks
            .drain(..)
            .partition(|t| t.missed <= max_missed);
        for track in evicted.iter_mut() {
            track.mark_evicted();
            debug!(
                track_id = track.track_id,
                class = %track.class,
                last_seen = track.frame_id,
                "evicted track"
            );
        }

        let mut new_tracks = Vec::with_capacity(unmatched_detections.len());
        for idet in unmatched_detections {
            let track = Track::new(self.next_id, detections[idet], frame_id);
            self.next_id += 1;
            debug!(track_id = track.track_id, class = %track.class, frame_id, "new track");
            new_tracks.push(track);
        }

        live.extend(new_tracks.iter().cloned());
        self.tracks = live;

        trace!(
            frame_id,
            live = self.tracks.len(),
            created = new_tracks.len(),
            evicted = evicted.len(),
            "tracker step"
        );

        StepResult {
            frame_id,
            updated_tracks: self.tracks.clone(),
            new_tracks,
            evicted,
        }
    }

    fn associate(&self, detections: &[&Detection]) -> AssignmentResult {
        let track_rects: Vec<Rect> = self.tracks.iter().map(|t| t.bbox).collect();
        let det_rects: Vec<Rect> = detections.iter().map(|d| d.bbox).collect();
        let ious = iou_batch(&track_rects, &det_rects);

        match self.config.assignment {
            AssignmentStrategy::Greedy => {
                matching::greedy_assignment(&ious, self.config.iou_threshold)
            }
            AssignmentStrategy::Optimal => {
                matching::optimal_assignment(&ious, self.config.iou_threshold)
            }
        }
    }

    /// Live tracks in creation order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Number of live tracks currently labelled `class`.
    pub fn live_count(&self, class: MaskClass) -> usize {
        self.tracks.iter().filter(|t| t.class == class).count()
    }
}
