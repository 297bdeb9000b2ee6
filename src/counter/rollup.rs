use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::counter::store::ClassCounts;

/// Live counts captured for one reporting period.
///
/// Handed to a persistence writer, which owns de-duplication of
/// `period_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollup {
    pub period_key: String,
    pub counts: ClassCounts,
    pub taken_at: DateTime<Utc>,
}

/// Hour bucket key for `ts`, e.g. `2024-03-07 14:00`.
pub fn hour_bucket<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.format("%Y-%m-%d %H:00").to_string()
}

/// Time left until the next top of the hour after `ts`.
pub fn until_next_hour<Tz: TimeZone>(ts: &DateTime<Tz>) -> Duration {
    let elapsed = Duration::from_secs(u64::from(ts.minute() * 60 + ts.second()))
        + Duration::from_nanos(u64::from(ts.nanosecond() % 1_000_000_000));
    Duration::from_secs(3600).saturating_sub(elapsed)
}
