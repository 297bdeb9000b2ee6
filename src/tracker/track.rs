//! Single tracked entity.

use crate::tracker::mask_class::MaskClass;
use crate::tracker::matching::Detection;
use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique identifier, never reused within one associator
    pub track_id: u64,
    pub state: TrackState,
    /// Box of the last matched detection
    pub bbox: Rect,
    /// Class of the last matched detection
    pub class: MaskClass,
    /// Score of the last matched detection
    pub score: f32,
    /// Consecutive frames without a match
    pub missed: u32,
    /// Number of detections absorbed, including the one that created it
    pub hits: u32,
    /// Frame the track was created on
    pub start_frame: u64,
    /// Last frame the track was matched on
    pub frame_id: u64,
}

impl Track {
    pub(crate) fn new(track_id: u64, detection: &Detection, frame_id: u64) -> Self {
        Self {
            track_id,
            state: TrackState::Created,
            bbox: detection.bbox,
            class: detection.class,
            score: detection.score,
            missed: 0,
            hits: 1,
            start_frame: frame_id,
            frame_id,
        }
    }

    /// Absorb a matched detection. The latest detection's class wins.
    pub(crate) fn update(&mut self, detection: &Detection, frame_id: u64) {
        self.bbox = detection.bbox;
        self.class = detection.class;
        self.score = detection.score;
        self.missed = 0;
        self.hits += 1;
        self.frame_id = frame_id;
        self.state = TrackState::Active;
    }

    pub(crate) fn mark_missed(&mut self) {
        self.missed += 1;
        self.state = TrackState::Stale;
    }

    pub(crate) fn mark_evicted(&mut self) {
        self.state = TrackState::Evicted;
    }

    pub fn is_live(&self) -> bool {
        self.state != TrackState::Evicted
    }

    pub fn end_frame(&self) -> u64 {
        self.frame_id
    }
}
