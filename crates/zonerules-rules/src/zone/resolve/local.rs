//! Queries keyed by a local date-time.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime};

use crate::zone::core::{RuleSet, TransitionRecord, UtcOffset};

/// Outcome of resolving a local date-time against a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocalInfo {
    /// Exactly one offset is valid.
    Offset(UtcOffset),
    /// The local date-time falls in a gap or an overlap.
    Transition(TransitionRecord),
}

/// A local date-time paired with the offset chosen for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedLocal {
    /// Wall-clock reading, moved past the gap if the input fell inside one.
    pub date_time: NaiveDateTime,
    pub offset: UtcOffset,
}

impl ResolvedLocal {
    /// Epoch second of the resolved reading.
    #[must_use]
    pub fn epoch_second(&self) -> i64 {
        self.date_time.and_utc().timestamp() - i64::from(self.offset.seconds())
    }

    /// The resolved reading as a chrono date-time with a fixed offset.
    #[must_use]
    pub fn to_date_time(&self) -> DateTime<FixedOffset> {
        DateTime::from_naive_utc_and_offset(
            self.date_time - self.offset.as_duration(),
            self.offset.to_fixed(),
        )
    }
}

impl RuleSet {
    /// ## Summary
    /// Returns the best offset for `local`.
    ///
    /// Inside a gap or an overlap this is the offset before the transition.
    #[must_use]
    pub fn offset_at_local_datetime(&self, local: NaiveDateTime) -> UtcOffset {
        match self.local_info(local) {
            LocalInfo::Offset(offset) => offset,
            LocalInfo::Transition(trans) => trans.offset_before(),
        }
    }

    /// ## Summary
    /// Returns every offset under which `local` occurs, in ascending order.
    ///
    /// Empty inside a gap, two entries inside an overlap, otherwise one.
    #[must_use]
    pub fn valid_offsets_at_local_datetime(&self, local: NaiveDateTime) -> Vec<UtcOffset> {
        match self.local_info(local) {
            LocalInfo::Offset(offset) => vec![offset],
            LocalInfo::Transition(trans) => trans.valid_offsets(),
        }
    }

    /// Returns the transition `local` falls into, if it is in a gap or an overlap.
    #[must_use]
    pub fn transition_at_local_datetime(&self, local: NaiveDateTime) -> Option<TransitionRecord> {
        match self.local_info(local) {
            LocalInfo::Offset(_) => None,
            LocalInfo::Transition(trans) => Some(trans),
        }
    }

    /// Checks whether `offset` is valid for `local`.
    #[must_use]
    pub fn is_valid_offset(&self, local: NaiveDateTime, offset: UtcOffset) -> bool {
        match self.local_info(local) {
            LocalInfo::Offset(valid) => valid == offset,
            LocalInfo::Transition(trans) => trans.is_valid_offset(offset),
        }
    }

    /// ## Summary
    /// Picks a single offset for `local`.
    ///
    /// A reading inside a gap is moved forward by the length of the gap and
    /// uses the offset after it. Inside an overlap `preferred` wins when it is
    /// one of the two valid offsets, otherwise the earlier occurrence is used.
    #[must_use]
    pub fn resolve_local(&self, local: NaiveDateTime, preferred: Option<UtcOffset>) -> ResolvedLocal {
        match self.local_info(local) {
            LocalInfo::Offset(offset) => ResolvedLocal {
                date_time: local,
                offset,
            },
            LocalInfo::Transition(trans) if trans.is_gap() => ResolvedLocal {
                date_time: local + trans.duration(),
                offset: trans.offset_after(),
            },
            LocalInfo::Transition(trans) => ResolvedLocal {
                date_time: local,
                offset: preferred
                    .filter(|&offset| trans.is_valid_offset(offset))
                    .unwrap_or(trans.offset_before()),
            },
        }
    }

    fn local_info(&self, local: NaiveDateTime) -> LocalInfo {
        let locals = &self.savings_local_transitions;

        let beyond_history = locals.last().is_none_or(|&last| local > last);
        if beyond_history && !self.last_rules.is_empty() {
            return self.local_info_from_rules(local);
        }

        // Last boundary at or before `local`; equal boundaries (a gap ending
        // where an overlap starts) resolve to the later pair
        let Some(index) = locals
            .partition_point(|&boundary| boundary <= local)
            .checked_sub(1)
        else {
            return LocalInfo::Offset(self.wall_offsets[0]);
        };

        if index % 2 == 1 {
            return LocalInfo::Offset(self.wall_offsets[index / 2 + 1]);
        }

        let offset_before = self.wall_offsets[index / 2];
        let offset_after = self.wall_offsets[index / 2 + 1];
        // Gap pairs are (before, after), overlap pairs (after, before)
        let local_before = if offset_after > offset_before {
            locals[index]
        } else {
            locals[index + 1]
        };
        LocalInfo::Transition(TransitionRecord::from_local_in_range(
            local_before,
            offset_before,
            offset_after,
        ))
    }

    fn local_info_from_rules(&self, local: NaiveDateTime) -> LocalInfo {
        let transitions = self.year_transitions(local.year());
        let mut info = LocalInfo::Offset(self.last_wall_offset());
        for trans in &*transitions {
            info = classify(local, trans);
            match info {
                LocalInfo::Transition(_) => return info,
                LocalInfo::Offset(offset) if offset == trans.offset_before() => return info,
                LocalInfo::Offset(_) => {}
            }
        }
        info
    }
}

/// Places `local` relative to a single transition.
fn classify(local: NaiveDateTime, trans: &TransitionRecord) -> LocalInfo {
    let before = trans.local_date_time_before();
    let after = trans.local_date_time_after();
    if trans.is_gap() {
        if local < before {
            LocalInfo::Offset(trans.offset_before())
        } else if local < after {
            LocalInfo::Transition(*trans)
        } else {
            LocalInfo::Offset(trans.offset_after())
        }
    } else if local >= before {
        LocalInfo::Offset(trans.offset_after())
    } else if local < after {
        LocalInfo::Offset(trans.offset_before())
    } else {
        LocalInfo::Transition(*trans)
    }
}
