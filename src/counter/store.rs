use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::counter::rollup::Rollup;
use crate::tracker::{MaskClass, StepResult, Track};

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// One counter per [`MaskClass`].
///
/// Serializes as `{with_mask, without_mask, mask_weared_incorrect}`; the
/// `unknown` bucket only appears once something landed in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub with_mask: u64,
    pub without_mask: u64,
    pub mask_weared_incorrect: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub unknown: u64,
}

impl ClassCounts {
    pub fn get(&self, class: MaskClass) -> u64 {
        match class {
            MaskClass::WithMask => self.with_mask,
            MaskClass::WithoutMask => self.without_mask,
            MaskClass::IncorrectMask => self.mask_weared_incorrect,
            MaskClass::Unknown => self.unknown,
        }
    }

    fn slot(&mut self, class: MaskClass) -> &mut u64 {
        match class {
            MaskClass::WithMask => &mut self.with_mask,
            MaskClass::WithoutMask => &mut self.without_mask,
            MaskClass::IncorrectMask => &mut self.mask_weared_incorrect,
            MaskClass::Unknown => &mut self.unknown,
        }
    }

    pub fn increment(&mut self, class: MaskClass) {
        *self.slot(class) += 1;
    }

    pub fn total(&self) -> u64 {
        MaskClass::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Tally tracks by their current class.
    pub fn from_tracks<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Self {
        let mut counts = Self::default();
        for track in tracks {
            counts.increment(track.class);
        }
        counts
    }
}

/// Point-in-time copy of both tallies, shaped for the polling endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSnapshot {
    /// Live tracks per class
    pub current: ClassCounts,
    /// Distinct tracks ever created per class
    pub total: ClassCounts,
}

/// Live and cumulative per-class counts.
///
/// `live` is rebuilt from the authoritative track set on every update;
/// `cumulative` only ever grows, by one per newly created track.
#[derive(Debug, Clone, Default)]
pub struct CounterStore {
    live: ClassCounts,
    cumulative: ClassCounts,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute live counts from `live_tracks` and credit `new_tracks` to
    /// the cumulative counts. The only path that mutates cumulative counts.
    pub fn update(&mut self, live_tracks: &[Track], new_tracks: &[Track]) {
        self.live = ClassCounts::from_tracks(live_tracks.iter().filter(|t| t.is_live()));
        for track in new_tracks {
            self.cumulative.increment(track.class);
        }
    }

    /// [`CounterStore::update`] from a tracker step.
    pub fn apply(&mut self, step: &StepResult) {
        self.update(&step.updated_tracks, &step.new_tracks);
    }

    pub fn snapshot(&self) -> CountSnapshot {
        CountSnapshot {
            current: self.live,
            total: self.cumulative,
        }
    }

    pub fn live(&self) -> ClassCounts {
        self.live
    }

    pub fn cumulative(&self) -> ClassCounts {
        self.cumulative
    }

    /// Read-only observation of the live counts for `period_key`.
    /// Nothing is reset.
    pub fn rollup(&self, period_key: impl Into<String>) -> Rollup {
        let rollup = Rollup {
            period_key: period_key.into(),
            counts: self.live,
            taken_at: Utc::now(),
        };
        info!(
            period = %rollup.period_key,
            live = rollup.counts.total(),
            cumulative = self.cumulative.total(),
            "count rollup"
        );
        rollup
    }
}
