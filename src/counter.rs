//! Per-class live and cumulative tallies.

mod rollup;
mod store;

pub use rollup::{Rollup, hour_bucket, until_next_hour};
pub use store::{ClassCounts, CountSnapshot, CounterStore};
