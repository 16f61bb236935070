//! Instants on the UTC time-line.

use chrono::{DateTime, Utc};

/// An instant: whole seconds since 1970-01-01T00:00:00Z plus a sub-second part.
///
/// Stored transitions have whole-second precision; the nanoseconds only matter
/// when looking for the previous transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    /// Seconds since the epoch, civil (no leap seconds).
    pub seconds: i64,
    /// Nanoseconds past `seconds`, always below one billion.
    pub nanos: u32,
}

impl Timestamp {
    /// Creates a timestamp from a whole epoch second.
    #[must_use]
    pub const fn from_epoch_second(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Creates a timestamp, carrying excess nanoseconds into the seconds.
    #[must_use]
    pub fn new(seconds: i64, nanos: u32) -> Self {
        Self {
            seconds: seconds.saturating_add(i64::from(nanos / 1_000_000_000)),
            nanos: nanos % 1_000_000_000,
        }
    }
}

impl From<i64> for Timestamp {
    fn from(seconds: i64) -> Self {
        Self::from_epoch_second(seconds)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::new(dt.timestamp(), dt.timestamp_subsec_nanos())
    }
}
