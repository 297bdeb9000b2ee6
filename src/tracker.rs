mod associator;
mod mask_class;
mod matching;
mod rect;
mod track;
mod track_state;

pub use associator::{AssignmentStrategy, StepResult, TrackAssociator, TrackerConfig};
pub use mask_class::MaskClass;
pub use matching::{AssignmentResult, Detection, greedy_assignment, optimal_assignment};
pub use rect::{IOU_EPSILON, Rect, iou_batch};
pub use track::Track;
pub use track_state::TrackState;
