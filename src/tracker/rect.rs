use ndarray::Array2;

/// Added to the IoU denominator so two degenerate boxes never divide by zero.
pub const IOU_EPSILON: f32 = 1e-6;

/// Axis-aligned bounding box in pixel coordinates.
///
/// Stored as top-left corner plus dimensions (TLWH). Detectors report
/// corner pairs, so [`Rect::from_tlbr`] is the usual way in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from corner coordinates (x1, y1, x2, y2).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to corner format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Area of the box; zero for degenerate boxes rather than negative.
    #[inline]
    pub fn area(&self) -> f32 {
        if self.is_degenerate() {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// True when the box has zero or negative extent on either axis
    /// (or a NaN coordinate).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Intersection over Union with another box.
    ///
    /// Returns 0 for disjoint boxes and whenever either box is degenerate.
    pub fn iou(&self, other: &Rect) -> f32 {
        if self.is_degenerate() || other.is_degenerate() {
            return 0.0;
        }

        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        if inter_area <= 0.0 {
            return 0.0;
        }

        inter_area / (self.area() + other.area() - inter_area + IOU_EPSILON)
    }
}

/// Calculate the IoU matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn iou_batch(boxes_a: &[Rect], boxes_b: &[Rect]) -> Array2<f32> {
    let mut ious = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            ious[[i, j]] = a.iou(b);
        }
    }
    ious
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(rect.center(), (25.0, 40.0));
    }

    #[test]
    fn test_iou() {
        let a = Rect::from_tlbr(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_tlbr(5.0, 5.0, 15.0, 15.0);

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        let iou = a.iou(&b);
        assert!((iou - 25.0 / 175.0).abs() < 1e-5);
        assert!((b.iou(&a) - iou).abs() < 1e-7);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_touching_edges() {
        let a = Rect::from_tlbr(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_tlbr(10.0, 0.0, 20.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_same_box() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_boxes() {
        let point = Rect::from_tlbr(5.0, 5.0, 5.0, 5.0);
        let inverted = Rect::from_tlbr(10.0, 10.0, 0.0, 0.0);
        let normal = Rect::from_tlbr(0.0, 0.0, 10.0, 10.0);

        assert!(point.is_degenerate());
        assert!(inverted.is_degenerate());
        assert_eq!(inverted.area(), 0.0);
        assert_eq!(point.iou(&point), 0.0);
        assert_eq!(inverted.iou(&normal), 0.0);
        assert_eq!(normal.iou(&inverted), 0.0);
    }

    #[test]
    fn test_iou_batch_shape() {
        let a = [Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(50.0, 50.0, 10.0, 10.0)];
        let b = [Rect::new(0.0, 0.0, 10.0, 10.0)];
        let ious = iou_batch(&a, &b);
        assert_eq!(ious.dim(), (2, 1));
        assert!((ious[[0, 0]] - 1.0).abs() < 1e-6);
        assert_eq!(ious[[1, 0]], 0.0);
    }
}
