//! Integration module for connecting a mask detector with the tracker and
//! counters.
//!
//! [`Monitor`] is the shared state handed to both the frame loop and any
//! readers; [`TrackerPipeline`] drives a [`DetectionSource`] into it.

mod builder;
mod detector;
mod monitor;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use monitor::Monitor;
pub use pipeline::{FrameOutcome, PipelineConfig, TrackerPipeline};
