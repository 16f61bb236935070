//! UTC offsets.

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, TimeDelta};
use zonerules_core::constants::MAX_OFFSET_SECONDS;

use super::error::{ValidationError, ValidationResult};

/// UTC offset in seconds.
///
/// Positive values are east of UTC, negative values are west. The magnitude
/// never exceeds 18 hours; equality and ordering follow the seconds value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset {
    seconds: i32,
}

impl UtcOffset {
    /// The zero offset.
    pub const UTC: Self = Self { seconds: 0 };

    /// ## Summary
    /// Creates an offset from total seconds.
    ///
    /// ## Errors
    /// Returns [`ValidationError::OffsetOutOfRange`] if the magnitude exceeds 18 hours.
    pub fn from_seconds(seconds: i32) -> ValidationResult<Self> {
        if seconds.abs() > MAX_OFFSET_SECONDS {
            return Err(ValidationError::OffsetOutOfRange(i64::from(seconds)));
        }
        Ok(Self { seconds })
    }

    /// ## Summary
    /// Creates an offset from hours, minutes and seconds.
    ///
    /// All components should carry the same sign, e.g. `(-5, -30, 0)` for `-05:30`.
    ///
    /// ## Errors
    /// Returns [`ValidationError::OffsetOutOfRange`] if the total exceeds 18 hours.
    pub fn from_hms(hours: i32, minutes: i32, seconds: i32) -> ValidationResult<Self> {
        let total = i64::from(hours) * 3600 + i64::from(minutes) * 60 + i64::from(seconds);
        let total = i32::try_from(total).map_err(|_e| ValidationError::OffsetOutOfRange(total))?;
        Self::from_seconds(total)
    }

    /// Total seconds from UTC.
    #[must_use]
    pub const fn seconds(self) -> i32 {
        self.seconds
    }

    /// Returns the offset as a chrono duration.
    #[must_use]
    pub fn as_duration(self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.seconds))
    }

    /// Returns the offset as a chrono fixed offset.
    ///
    /// ## Panics
    /// Never in practice: the offset is within 18 hours, inside chrono's range.
    #[must_use]
    #[expect(clippy::expect_used, reason = "Offsets are validated on construction")]
    pub fn to_fixed(self) -> FixedOffset {
        FixedOffset::east_opt(self.seconds).expect("offsets are bounded by 18 hours")
    }

    /// ## Summary
    /// Parses an offset such as `Z`, `+05`, `-0800`, `+05:30` or `+05:30:15`.
    ///
    /// ## Errors
    /// Returns [`ValidationError::InvalidOffset`] if the text is malformed and
    /// [`ValidationError::OffsetOutOfRange`] if it exceeds 18 hours.
    pub fn parse(s: &str) -> ValidationResult<Self> {
        let s = s.trim();
        if s == "Z" || s == "z" {
            return Ok(Self::UTC);
        }

        let invalid = || ValidationError::InvalidOffset(s.to_string());

        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };

        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // Colons are optional but must separate two-digit groups when present
        if rest.contains(':') && rest.split(':').any(|group| group.len() != 2) {
            return Err(invalid());
        }

        let field = |range: std::ops::Range<usize>| -> ValidationResult<i32> {
            digits
                .get(range)
                .and_then(|d| d.parse().ok())
                .ok_or_else(invalid)
        };

        let (hours, minutes, seconds) = match digits.len() {
            2 => (field(0..2)?, 0, 0),
            4 => (field(0..2)?, field(2..4)?, 0),
            6 => (field(0..2)?, field(2..4)?, field(4..6)?),
            _ => return Err(invalid()),
        };
        if minutes > 59 || seconds > 59 {
            return Err(invalid());
        }

        Self::from_hms(sign * hours, sign * minutes, sign * seconds)
    }
}

impl FromStr for UtcOffset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<UtcOffset> for FixedOffset {
    fn from(offset: UtcOffset) -> Self {
        offset.to_fixed()
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds == 0 {
            return f.write_str("Z");
        }
        let sign = if self.seconds >= 0 { '+' } else { '-' };
        let total = self.seconds.abs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        if seconds == 0 {
            write!(f, "{sign}{hours:02}:{minutes:02}")
        } else {
            write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}
