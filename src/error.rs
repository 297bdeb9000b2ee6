use thiserror::Error;

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    #[error("IoU threshold must be within [0, 1], got {0}")]
    InvalidIouThreshold(f32),

    #[error("minimum detection score must be within [0, 1], got {0}")]
    InvalidMinScore(f32),
}
