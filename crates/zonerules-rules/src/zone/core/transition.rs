//! Concrete offset changes.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike};

use super::error::{ValidationError, ValidationResult};
use super::offset::UtcOffset;

/// One concrete change of the wall offset at a specific instant.
///
/// The local date-times on either side are derived once at construction, so
/// every record is guaranteed to lie inside the supported calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionRecord {
    epoch_second: i64,
    local_before: NaiveDateTime,
    offset_before: UtcOffset,
    offset_after: UtcOffset,
}

/// Local wall-clock reading of `epoch_second` under `offset`, if representable.
pub(crate) fn local_date_time(epoch_second: i64, offset: UtcOffset) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(epoch_second, 0)?
        .naive_utc()
        .checked_add_signed(offset.as_duration())
}

impl TransitionRecord {
    /// ## Summary
    /// Creates a transition occurring at `epoch_second`.
    ///
    /// ## Errors
    /// Returns [`ValidationError::EqualOffsets`] if both offsets are the same and
    /// [`ValidationError::EpochOutOfRange`] if either local reading falls outside
    /// the calendar range.
    pub fn new(
        epoch_second: i64,
        offset_before: UtcOffset,
        offset_after: UtcOffset,
    ) -> ValidationResult<Self> {
        if offset_before == offset_after {
            return Err(ValidationError::EqualOffsets);
        }
        Self::between(epoch_second, offset_before, offset_after)
    }

    /// ## Summary
    /// Creates a transition from the wall-clock reading just before it happens.
    ///
    /// For a spring-forward change at 02:00 local time, `local_before` is 02:00
    /// and `offset_before` the winter offset.
    ///
    /// ## Errors
    /// Returns [`ValidationError::SubSecondPrecision`] if `local_before` carries
    /// nanoseconds, plus the errors of [`TransitionRecord::new`].
    pub fn from_local(
        local_before: NaiveDateTime,
        offset_before: UtcOffset,
        offset_after: UtcOffset,
    ) -> ValidationResult<Self> {
        if local_before.nanosecond() != 0 {
            return Err(ValidationError::SubSecondPrecision);
        }
        let epoch_second = local_before.and_utc().timestamp() - i64::from(offset_before.seconds());
        Self::new(epoch_second, offset_before, offset_after)
    }

    /// Builds a record without rejecting equal offsets.
    ///
    /// Decoded offset arrays may repeat an offset; such a record is neither a
    /// gap nor an overlap.
    pub(crate) fn between(
        epoch_second: i64,
        offset_before: UtcOffset,
        offset_after: UtcOffset,
    ) -> ValidationResult<Self> {
        let local_before = local_date_time(epoch_second, offset_before)
            .ok_or(ValidationError::EpochOutOfRange(epoch_second))?;
        if local_date_time(epoch_second, offset_after).is_none() {
            return Err(ValidationError::EpochOutOfRange(epoch_second));
        }
        Ok(Self {
            epoch_second,
            local_before,
            offset_before,
            offset_after,
        })
    }

    /// Builds a record from a local reading already known to be in range.
    pub(crate) fn from_local_in_range(
        local_before: NaiveDateTime,
        offset_before: UtcOffset,
        offset_after: UtcOffset,
    ) -> Self {
        Self {
            epoch_second: local_before.and_utc().timestamp() - i64::from(offset_before.seconds()),
            local_before,
            offset_before,
            offset_after,
        }
    }

    /// Epoch second at which the new offset takes effect.
    #[must_use]
    pub const fn epoch_second(&self) -> i64 {
        self.epoch_second
    }

    #[must_use]
    pub const fn offset_before(&self) -> UtcOffset {
        self.offset_before
    }

    #[must_use]
    pub const fn offset_after(&self) -> UtcOffset {
        self.offset_after
    }

    /// Wall-clock reading at the transition instant using the old offset.
    #[must_use]
    pub const fn local_date_time_before(&self) -> NaiveDateTime {
        self.local_before
    }

    /// Wall-clock reading at the transition instant using the new offset.
    #[must_use]
    pub fn local_date_time_after(&self) -> NaiveDateTime {
        self.local_before + self.duration()
    }

    /// Signed size of the change (positive for a gap).
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(
            self.offset_after.seconds() - self.offset_before.seconds(),
        ))
    }

    /// Clocks jump forward, skipping a range of local times.
    #[must_use]
    pub fn is_gap(&self) -> bool {
        self.offset_after > self.offset_before
    }

    /// Clocks are set back, repeating a range of local times.
    #[must_use]
    pub fn is_overlap(&self) -> bool {
        self.offset_after < self.offset_before
    }

    /// ## Summary
    /// Checks whether `offset` is valid for local times inside this transition.
    ///
    /// No offset is valid inside a gap; inside an overlap both are.
    #[must_use]
    pub fn is_valid_offset(&self, offset: UtcOffset) -> bool {
        !self.is_gap() && (self.offset_before == offset || self.offset_after == offset)
    }

    /// Offsets valid for local times inside this transition, in ascending order.
    #[must_use]
    pub fn valid_offsets(&self) -> Vec<UtcOffset> {
        match self.offset_after.cmp(&self.offset_before) {
            Ordering::Greater => Vec::new(),
            Ordering::Less => vec![self.offset_after, self.offset_before],
            Ordering::Equal => vec![self.offset_before],
        }
    }
}

impl PartialOrd for TransitionRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TransitionRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_second
            .cmp(&other.epoch_second)
            .then(self.offset_before.cmp(&other.offset_before))
            .then(self.offset_after.cmp(&other.offset_after))
    }
}

impl fmt::Display for TransitionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transition[{} at {}{} to {}]",
            if self.is_gap() { "Gap" } else { "Overlap" },
            self.local_before.format("%Y-%m-%dT%H:%M:%S"),
            self.offset_before,
            self.offset_after
        )
    }
}
