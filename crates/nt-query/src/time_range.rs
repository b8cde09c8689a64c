//! Query time windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time window of a query: relative to now, or pinned to epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeRange {
    Absolute { begin_time: i64, end_time: i64 },
    Duration { duration_ms: u64 },
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Duration {
            duration_ms: 30 * 60 * 1000,
        }
    }
}

impl TimeRange {
    /// Query clause with a leading space, e.g. ` SINCE 1800 SECONDS AGO`.
    pub fn to_nrql(&self) -> String {
        match *self {
            TimeRange::Absolute {
                begin_time,
                end_time,
            } => format!(" SINCE {begin_time} UNTIL {end_time}"),
            TimeRange::Duration { duration_ms } => {
                format!(" SINCE {} SECONDS AGO", duration_ms as f64 / 1000.0)
            }
        }
    }

    /// Pin a relative window so that it ends at `now`.
    pub fn to_absolute(&self, now: DateTime<Utc>) -> TimeRange {
        match *self {
            TimeRange::Absolute { .. } => *self,
            TimeRange::Duration { duration_ms } => {
                let end_time = now.timestamp();
                let span = i64::try_from(duration_ms / 1000).unwrap_or(i64::MAX);
                TimeRange::Absolute {
                    begin_time: end_time.saturating_sub(span),
                    end_time,
                }
            }
        }
    }
}
