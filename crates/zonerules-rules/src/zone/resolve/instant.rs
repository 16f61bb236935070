//! Queries keyed by an instant.

use chrono::TimeDelta;
use zonerules_core::constants::{MAX_RULE_YEAR, MIN_RULE_YEAR};

use super::year::year_of_epoch_second;
use crate::zone::core::{RuleSet, Timestamp, TransitionRecord, UtcOffset};

impl RuleSet {
    /// ## Summary
    /// Returns the wall offset in force at `instant`.
    ///
    /// Instants after the last concrete transition are answered from the
    /// recurring rules of the year containing them.
    #[must_use]
    pub fn offset_at_instant(&self, instant: impl Into<Timestamp>) -> UtcOffset {
        let epoch_second = instant.into().seconds;

        let beyond_history = self
            .savings_transitions
            .last()
            .is_none_or(|&last| epoch_second > last);
        if beyond_history && !self.last_rules.is_empty() {
            let year = year_of_epoch_second(epoch_second, self.last_wall_offset());
            let transitions = self.year_transitions(year);
            if let Some(trans) = transitions
                .iter()
                .find(|trans| epoch_second < trans.epoch_second())
            {
                return trans.offset_before();
            }
            return transitions
                .last()
                .map_or(self.last_wall_offset(), TransitionRecord::offset_after);
        }

        let index = self
            .savings_transitions
            .partition_point(|&trans| trans <= epoch_second);
        self.wall_offsets[index]
    }

    /// ## Summary
    /// Returns the standard offset in force at `instant`.
    ///
    /// The standard offset only changes at concrete transitions.
    #[must_use]
    pub fn standard_offset_at(&self, instant: impl Into<Timestamp>) -> UtcOffset {
        let epoch_second = instant.into().seconds;
        let index = self
            .standard_transitions
            .partition_point(|&trans| trans <= epoch_second);
        self.standard_offsets[index]
    }

    /// Checks whether daylight saving time is in effect at `instant`.
    #[must_use]
    pub fn is_daylight_savings(&self, instant: impl Into<Timestamp>) -> bool {
        let instant = instant.into();
        self.offset_at_instant(instant) != self.standard_offset_at(instant)
    }

    /// ## Summary
    /// Amount of daylight saving in effect at `instant`.
    ///
    /// Wall offset minus standard offset; zero for fixed-offset zones.
    #[must_use]
    pub fn daylight_savings(&self, instant: impl Into<Timestamp>) -> TimeDelta {
        if self.is_fixed_offset() {
            return TimeDelta::zero();
        }
        let instant = instant.into();
        self.offset_at_instant(instant).as_duration() - self.standard_offset_at(instant).as_duration()
    }

    /// ## Summary
    /// Returns the first transition strictly after `instant`.
    ///
    /// Returns `None` when the zone has no further transitions.
    #[must_use]
    pub fn next_transition(&self, instant: impl Into<Timestamp>) -> Option<TransitionRecord> {
        let epoch_second = instant.into().seconds;

        let at_or_beyond_history = self
            .savings_transitions
            .last()
            .is_none_or(|&last| epoch_second >= last);
        if at_or_beyond_history {
            if self.last_rules.is_empty() {
                return None;
            }
            let year = year_of_epoch_second(epoch_second, self.last_wall_offset());
            if let Some(trans) = self
                .year_transitions(year)
                .iter()
                .find(|trans| epoch_second < trans.epoch_second())
            {
                return Some(*trans);
            }
            if year >= MAX_RULE_YEAR {
                return None;
            }
            return self.year_transitions(year + 1).first().copied();
        }

        let index = self
            .savings_transitions
            .partition_point(|&trans| trans <= epoch_second);
        Some(self.transition_at_index(index))
    }

    /// ## Summary
    /// Returns the last transition strictly before `instant`.
    ///
    /// Transitions have whole-second precision, so an instant with a
    /// sub-second part is first rounded up to the next second.
    #[must_use]
    pub fn previous_transition(&self, instant: impl Into<Timestamp>) -> Option<TransitionRecord> {
        let instant = instant.into();
        let epoch_second = if instant.nanos > 0 {
            instant.seconds.saturating_add(1)
        } else {
            instant.seconds
        };

        let last_historic = self.savings_transitions.last().copied();
        let beyond_history = last_historic.is_none_or(|last| epoch_second > last);
        if beyond_history && !self.last_rules.is_empty() {
            let year = year_of_epoch_second(epoch_second, self.last_wall_offset());
            if let Some(trans) = self
                .year_transitions(year)
                .iter()
                .rev()
                .find(|trans| epoch_second > trans.epoch_second())
            {
                return Some(*trans);
            }

            // The rules of the previous year only apply after the history ends
            let last_historic_year = last_historic
                .map_or(MIN_RULE_YEAR, |last| year_of_epoch_second(last, self.last_wall_offset()));
            if year > MIN_RULE_YEAR && year - 1 > last_historic_year {
                return self.year_transitions(year - 1).last().copied();
            }
        }

        let index = self
            .savings_transitions
            .partition_point(|&trans| trans < epoch_second);
        index.checked_sub(1).map(|index| self.transition_at_index(index))
    }
}
