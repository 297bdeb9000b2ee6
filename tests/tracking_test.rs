use maskcount::{Detection, MaskClass, Monitor, TrackAssociator, TrackState, TrackerConfig};

fn det(x1: f32, y1: f32, x2: f32, y2: f32, class_id: i64) -> Detection {
    Detection::new(x1, y1, x2, y2, class_id, 0.9)
}

#[test]
fn test_single_person_lifecycle() {
    let monitor = Monitor::new(TrackerConfig::default());

    // Frame 1: one masked face
    let step = monitor.observe(&[det(100.0, 100.0, 200.0, 200.0, 0)]);
    assert_eq!(step.new_tracks.len(), 1);
    let id = step.new_tracks[0].track_id;
    assert_eq!(monitor.snapshot().total.with_mask, 1);

    // Frames 2-5: same face drifting slightly
    for i in 1..=4 {
        let offset = i as f32 * 3.0;
        let step = monitor.observe(&[det(
            100.0 + offset,
            100.0 + offset,
            200.0 + offset,
            200.0 + offset,
            0,
        )]);
        assert!(step.new_tracks.is_empty());
        assert_eq!(step.updated_tracks.len(), 1);
        assert_eq!(step.updated_tracks[0].track_id, id);

        let snapshot = monitor.snapshot();
        assert_eq!(snapshot.current.with_mask, 1);
        assert_eq!(snapshot.total.with_mask, 1);
    }

    // Frames 6-17: nobody in view
    let mut evicted_on = None;
    for frame in 6..=17 {
        let step = monitor.observe(&[]);
        if !step.evicted.is_empty() {
            assert_eq!(step.evicted[0].track_id, id);
            evicted_on.get_or_insert(frame);
        }
    }

    // Eleventh consecutive miss exceeds the default limit of ten.
    assert_eq!(evicted_on, Some(16));
    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.current.with_mask, 0);
    assert_eq!(snapshot.total.with_mask, 1);
    assert!(monitor.live_tracks().is_empty());
}

#[test]
fn test_eviction_boundary_and_no_id_reuse() {
    let mut tracker = TrackAssociator::default();
    let first = tracker.step(&[det(0.0, 0.0, 50.0, 50.0, 1)]).new_tracks[0].track_id;

    for _ in 0..10 {
        tracker.step(&[]);
    }
    assert_eq!(tracker.tracks().len(), 1);
    assert_eq!(tracker.tracks()[0].missed, 10);
    assert_eq!(tracker.tracks()[0].state, TrackState::Stale);

    let step = tracker.step(&[]);
    assert_eq!(step.evicted.len(), 1);
    assert!(tracker.tracks().is_empty());

    let step = tracker.step(&[det(0.0, 0.0, 50.0, 50.0, 1)]);
    assert_eq!(step.new_tracks.len(), 1);
    assert_ne!(step.new_tracks[0].track_id, first);
}

#[test]
fn test_stale_track_recovers() {
    let mut tracker = TrackAssociator::default();
    tracker.step(&[det(0.0, 0.0, 50.0, 50.0, 0)]);
    for _ in 0..5 {
        tracker.step(&[]);
    }

    let step = tracker.step(&[det(2.0, 2.0, 52.0, 52.0, 0)]);
    assert!(step.new_tracks.is_empty());
    assert_eq!(step.updated_tracks[0].track_id, 1);
    assert_eq!(step.updated_tracks[0].state, TrackState::Active);
    assert_eq!(step.updated_tracks[0].missed, 0);
}

fn scripted_frames() -> Vec<Vec<Detection>> {
    let mut frames = Vec::new();
    for i in 0..40 {
        let x = i as f32 * 4.0;
        let mut frame = vec![det(x, 0.0, x + 60.0, 60.0, (i % 3) as i64)];
        if i % 7 != 0 {
            frame.push(det(300.0, 100.0, 360.0, 160.0, 1));
        }
        if i > 20 && i < 25 {
            frame.push(det(500.0 - x, 300.0, 560.0 - x, 360.0, 2));
        }
        frames.push(frame);
    }
    frames.extend(std::iter::repeat_n(Vec::new(), 12));
    frames
}

#[test]
fn test_runs_are_deterministic() {
    let run = || {
        let mut tracker = TrackAssociator::default();
        scripted_frames()
            .iter()
            .map(|frame| tracker.step(frame))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_counts_stay_consistent() {
    let monitor = Monitor::default();
    let mut previous = monitor.snapshot().total;

    for frame in scripted_frames() {
        monitor.observe(&frame);
        let snapshot = monitor.snapshot();
        let tracks = monitor.live_tracks();

        for class in MaskClass::ALL {
            assert!(snapshot.total.get(class) >= previous.get(class));
            let live = tracks.iter().filter(|t| t.class == class).count() as u64;
            assert_eq!(snapshot.current.get(class), live);
        }
        previous = snapshot.total;
    }

    assert!(monitor.live_tracks().is_empty());
    assert_eq!(monitor.snapshot().current.total(), 0);
}
