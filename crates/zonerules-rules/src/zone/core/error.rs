//! Construction-time validation errors.

use chrono::NaiveTime;
use thiserror::Error;

/// A value handed to a constructor violates one of its invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("UTC offset {0}s is outside -18:00..=+18:00")]
    OffsetOutOfRange(i64),

    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),

    #[error("Offsets before and after a transition must differ")]
    EqualOffsets,

    #[error("Epoch second {0} is outside the supported calendar range")]
    EpochOutOfRange(i64),

    #[error("Local date-time has a non-zero sub-second part")]
    SubSecondPrecision,

    #[error("Day of month indicator {0} must be in -28..=31 and non-zero")]
    DayOfMonthIndicator(i8),

    #[error("End-of-day rules must use midnight, got {0}")]
    EndOfDayNotMidnight(NaiveTime),

    #[error("At most 16 transition rules are allowed, got {0}")]
    TooManyRules(usize),

    #[error("At most 1024 {array} are allowed, got {count}")]
    TooManyTransitions { array: &'static str, count: usize },

    #[error("{array} must be strictly increasing (index {index})")]
    NotIncreasing { array: &'static str, index: usize },

    #[error("{array} must have {expected} entries, got {found}")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        found: usize,
    },
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
