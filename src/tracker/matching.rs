//! Matching utilities for associating detections with live tracks.

use ndarray::Array2;

use crate::tracker::mask_class::MaskClass;
use crate::tracker::rect::Rect;

/// Detection input for the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box
    pub bbox: Rect,
    /// Detected class
    pub class: MaskClass,
    /// Detection confidence score in [0, 1]
    pub score: f32,
}

impl Detection {
    /// Build a detection from corner coordinates and a raw detector class id.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, class_id: i64, score: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            class: MaskClass::from_id(class_id),
            score,
        }
    }

    pub fn from_rect(bbox: Rect, class: MaskClass, score: f32) -> Self {
        Self { bbox, class, score }
    }
}

/// Outcome of one association pass. Indices refer to the rows (tracks) and
/// columns (detections) of the IoU matrix the pass was run on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// `(track_index, detection_index)` pairs, in detection order
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Greedy, order-dependent association.
///
/// Detections are visited in column order. Each one takes the still-unclaimed
/// track with the strictly highest IoU; on equal IoU the lower row (the older
/// track) wins. The pair is accepted only when that IoU is strictly greater
/// than `thresh`. Each track absorbs at most one detection.
pub fn greedy_assignment(ious: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_tracks, num_dets) = ious.dim();
    let mut consumed = vec![false; num_tracks];
    let mut matches = Vec::new();
    let mut unmatched_detections = Vec::new();

    for det in 0..num_dets {
        let mut best: Option<(usize, f32)> = None;
        for track in (0..num_tracks).filter(|&t| !consumed[t]) {
            let iou = ious[[track, det]];
            if best.is_none_or(|(_, best_iou)| iou > best_iou) {
                best = Some((track, iou));
            }
        }

        match best {
            Some((track, iou)) if iou > thresh => {
                consumed[track] = true;
                matches.push((track, det));
            }
            _ => unmatched_detections.push(det),
        }
    }

    let unmatched_tracks = consumed
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| if c { None } else { Some(i) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}

/// Globally optimal association via Jonker-Volgenant on `1 - IoU` costs.
///
/// Same acceptance rule as [`greedy_assignment`]: a pair only counts when its
/// IoU is strictly greater than `thresh`.
pub fn optimal_assignment(ious: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = ious.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: vec![],
            unmatched_detections: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: vec![],
        };
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), 1e6);

    for i in 0..num_rows {
        for j in 0..num_cols {
            padded[[i, j]] = 1.0 - ious[[i, j]] as f64;
        }
    }

    let mut matches = vec![];
    let mut unmatched_tracks = vec![];
    let mut unmatched_detections_mask: Vec<bool> = vec![true; num_cols];

    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
                if col_idx < num_cols && ious[[row_idx, col_idx]] > thresh {
                    matches.push((row_idx, col_idx));
                    unmatched_detections_mask[col_idx] = false;
                } else {
                    unmatched_tracks.push(row_idx);
                }
            }
        }
        Err(_) => {
            tracing::warn!("linear assignment failed, leaving frame unmatched");
            unmatched_tracks = (0..num_rows).collect();
        }
    }

    matches.sort_by_key(|&(_, det)| det);

    let unmatched_detections: Vec<usize> = unmatched_detections_mask
        .iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { Some(i) } else { None })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_greedy_empty_inputs() {
        let no_tracks = Array2::<f32>::zeros((0, 2));
        let result = greedy_assignment(&no_tracks, 0.3);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_detections, vec![0, 1]);

        let no_dets = Array2::<f32>::zeros((3, 0));
        let result = greedy_assignment(&no_dets, 0.3);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_tracks, vec![0, 1, 2]);
    }

    #[test]
    fn test_greedy_threshold_is_exclusive() {
        let ious = array![[0.3_f32, 0.31]];
        let result = greedy_assignment(&ious, 0.3);
        assert_eq!(result.matches, vec![(0, 1)]);
        assert_eq!(result.unmatched_detections, vec![0]);
    }

    #[test]
    fn test_greedy_ties_prefer_older_track() {
        let ious = array![[0.6_f32], [0.6]];
        let result = greedy_assignment(&ious, 0.3);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_tracks, vec![1]);
    }

    #[test]
    fn test_greedy_is_order_dependent() {
        // Detection 0 grabs track 0 even though detection 1 overlaps it more,
        // leaving detection 1 to fall back to nothing acceptable.
        let ious = array![[0.5_f32, 0.9], [0.1, 0.2]];
        let greedy = greedy_assignment(&ious, 0.3);
        assert_eq!(greedy.matches, vec![(0, 0)]);
        assert_eq!(greedy.unmatched_detections, vec![1]);
        assert_eq!(greedy.unmatched_tracks, vec![1]);
    }

    #[test]
    fn test_optimal_resolves_conflict() {
        let ious = array![[0.9_f32, 0.8], [0.85, 0.0]];
        let greedy = greedy_assignment(&ious, 0.3);
        assert_eq!(greedy.matches, vec![(0, 0)]);
        assert_eq!(greedy.unmatched_detections, vec![1]);

        let optimal = optimal_assignment(&ious, 0.3);
        assert_eq!(optimal.matches, vec![(1, 0), (0, 1)]);
        assert!(optimal.unmatched_tracks.is_empty());
        assert!(optimal.unmatched_detections.is_empty());
    }

    #[test]
    fn test_optimal_respects_threshold() {
        let ious = array![[0.3_f32], [0.0]];
        let result = optimal_assignment(&ious, 0.3);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_tracks, vec![0, 1]);
        assert_eq!(result.unmatched_detections, vec![0]);
    }
}
