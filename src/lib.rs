//! Multi-object tracking and per-class counting for webcam face-mask detection.
//!
//! A detector (external) yields boxes with a class and a score for every frame.
//! [`TrackAssociator`] links them into persistent tracks with greedy IoU
//! matching, and [`CounterStore`] keeps the currently-visible and ever-seen
//! tallies per class. [`Monitor`] bundles both behind one lock so a frame loop
//! and any number of polling readers can share them.

pub mod counter;
pub mod error;
pub mod integration;
pub mod tracker;

pub use counter::{ClassCounts, CountSnapshot, CounterStore, Rollup};
pub use error::{Result, TrackerError};
pub use integration::{
    DetectionBuilder, DetectionSource, FrameOutcome, IntoDetections, Monitor, PipelineConfig,
    TrackerPipeline,
};
pub use tracker::{
    AssignmentStrategy, Detection, MaskClass, Rect, StepResult, Track, TrackAssociator,
    TrackState, TrackerConfig,
};
