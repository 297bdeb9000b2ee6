//! Trait for object detection inference backends.

use crate::tracker::Detection;

/// Trait for mask detection backends.
///
/// Implement this trait to feed any detection model into a
/// [`crate::TrackerPipeline`].
///
/// # Example
///
/// ```ignore
/// use maskcount::{Detection, DetectionSource};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return boxes with class ids 0..=2
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: std::fmt::Display;

    /// Run inference on one frame.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// # Returns
    /// The frame's detections in any order, possibly none.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// Raw `(x1, y1, x2, y2, class_id, score)` rows as most detector heads emit them.
impl IntoDetections for Vec<([f32; 4], i64, f32)> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|([x1, y1, x2, y2], class_id, score)| {
                Detection::new(x1, y1, x2, y2, class_id, score)
            })
            .collect()
    }
}
