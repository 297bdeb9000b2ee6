/// Lifecycle of a single track.
///
/// `Created -> Active -> Stale -> Evicted`, with `Stale -> Active` on any
/// match before eviction. `Evicted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Spawned this frame from an unmatched detection
    #[default]
    Created,
    /// Matched on the most recent frame
    Active,
    /// Missed one or more consecutive frames, still live
    Stale,
    /// Missed more frames than allowed, removed for good
    Evicted,
}
