//! The zone rules aggregate.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};
use zonerules_core::constants::{
    DEFAULT_FIRST_CACHED_YEAR, MAX_ENCODED_TRANSITIONS, MAX_TRANSITION_RULES,
};

use super::error::{ValidationError, ValidationResult};
use super::offset::UtcOffset;
use super::rule::TransitionRule;
use super::transition::TransitionRecord;
use crate::zone::resolve::cache::YearCache;

/// Offset history and future rules of one zone.
///
/// Built once, then shared read-only; only the per-year rule cache changes
/// after construction and it never affects query results.
pub struct RuleSet {
    /// Instants at which the standard offset changed.
    pub(crate) standard_transitions: Vec<i64>,
    /// Standard offsets, one more than `standard_transitions`.
    pub(crate) standard_offsets: Vec<UtcOffset>,
    /// Instants at which the wall offset changed.
    pub(crate) savings_transitions: Vec<i64>,
    /// Wall offsets, one more than `savings_transitions`.
    pub(crate) wall_offsets: Vec<UtcOffset>,
    /// Two local readings per transition, earlier first, so gaps and overlaps
    /// can share one ascending binary search.
    pub(crate) savings_local_transitions: Vec<NaiveDateTime>,
    /// Rules for the years after the last concrete transition.
    pub(crate) last_rules: Vec<TransitionRule>,
    pub(crate) cache: YearCache,
}

impl RuleSet {
    /// Creates rules for a zone that always uses `offset`.
    #[must_use]
    pub fn fixed(offset: UtcOffset) -> Self {
        Self::assemble(
            Vec::new(),
            vec![offset],
            Vec::new(),
            vec![offset],
            Vec::new(),
            Vec::new(),
        )
    }

    /// ## Summary
    /// Creates rules from transition lists, as supplied by a zone data loader.
    ///
    /// `standard_changes` lists the changes of the standard offset,
    /// `transitions` every change of the wall offset. Both must be in strictly
    /// increasing instant order.
    ///
    /// A transition whose offset before differs from the preceding offset
    /// after is logged and accepted; the wall offsets follow `offset_after`.
    ///
    /// ## Errors
    /// Returns [`ValidationError::NotIncreasing`] for unsorted lists,
    /// [`ValidationError::TooManyRules`] for more than 16 rules and the other
    /// errors of [`RuleSet::from_arrays`].
    pub fn new(
        base_standard_offset: UtcOffset,
        base_wall_offset: UtcOffset,
        standard_changes: &[TransitionRecord],
        transitions: &[TransitionRecord],
        last_rules: Vec<TransitionRule>,
    ) -> ValidationResult<Self> {
        warn_if_discontinuous(base_wall_offset, transitions);

        let mut standard_transitions = Vec::with_capacity(standard_changes.len());
        let mut standard_offsets = Vec::with_capacity(standard_changes.len() + 1);
        standard_offsets.push(base_standard_offset);
        for change in standard_changes {
            standard_transitions.push(change.epoch_second());
            standard_offsets.push(change.offset_after());
        }

        let mut savings_transitions = Vec::with_capacity(transitions.len());
        let mut wall_offsets = Vec::with_capacity(transitions.len() + 1);
        wall_offsets.push(base_wall_offset);
        for trans in transitions {
            savings_transitions.push(trans.epoch_second());
            wall_offsets.push(trans.offset_after());
        }

        Self::from_arrays(
            standard_transitions,
            standard_offsets,
            savings_transitions,
            wall_offsets,
            last_rules,
        )
    }

    /// ## Summary
    /// Creates rules from their array form, as read back by the decoder.
    ///
    /// ## Errors
    /// Returns a [`ValidationError`] if an offset array is not exactly one longer
    /// than its transition array, if a transition array is not strictly
    /// increasing, if a transition lies outside the calendar range, if either
    /// transition array holds more than 1024 entries or if there are more than
    /// 16 rules.
    pub fn from_arrays(
        standard_transitions: Vec<i64>,
        standard_offsets: Vec<UtcOffset>,
        savings_transitions: Vec<i64>,
        wall_offsets: Vec<UtcOffset>,
        last_rules: Vec<TransitionRule>,
    ) -> ValidationResult<Self> {
        ensure_length("standard offsets", standard_transitions.len() + 1, standard_offsets.len())?;
        ensure_length("wall offsets", savings_transitions.len() + 1, wall_offsets.len())?;
        ensure_transition_count("standard transitions", &standard_transitions)?;
        ensure_transition_count("transitions", &savings_transitions)?;
        ensure_increasing("standard transitions", &standard_transitions)?;
        ensure_increasing("transitions", &savings_transitions)?;
        ensure_rule_count(&last_rules)?;

        let mut local_transitions = Vec::with_capacity(savings_transitions.len() * 2);
        for (i, &epoch_second) in savings_transitions.iter().enumerate() {
            let trans = TransitionRecord::between(epoch_second, wall_offsets[i], wall_offsets[i + 1])?;
            push_local_pair(&mut local_transitions, &trans);
        }

        Ok(Self::assemble(
            standard_transitions,
            standard_offsets,
            savings_transitions,
            wall_offsets,
            local_transitions,
            last_rules,
        ))
    }

    fn assemble(
        standard_transitions: Vec<i64>,
        standard_offsets: Vec<UtcOffset>,
        savings_transitions: Vec<i64>,
        wall_offsets: Vec<UtcOffset>,
        savings_local_transitions: Vec<NaiveDateTime>,
        last_rules: Vec<TransitionRule>,
    ) -> Self {
        // Rules are consulted only after the last concrete transition
        let first_cached_year = savings_local_transitions
            .last()
            .map_or(DEFAULT_FIRST_CACHED_YEAR, |dt| dt.year() - 1);
        let cache = if last_rules.is_empty() {
            YearCache::disabled()
        } else {
            YearCache::new(first_cached_year)
        };

        let rules = Self {
            standard_transitions,
            standard_offsets,
            savings_transitions,
            wall_offsets,
            savings_local_transitions,
            last_rules,
            cache,
        };
        tracing::debug!(
            standard_transitions = rules.standard_transitions.len(),
            transitions = rules.savings_transitions.len(),
            rules = rules.last_rules.len(),
            fixed = rules.is_fixed_offset(),
            "Built rule set"
        );
        rules
    }

    /// ## Summary
    /// Checks whether the zone always uses one offset.
    ///
    /// True only without transitions, without rules and with equal standard
    /// and wall base offsets.
    #[must_use]
    pub fn is_fixed_offset(&self) -> bool {
        self.standard_transitions.is_empty()
            && self.savings_transitions.is_empty()
            && self.last_rules.is_empty()
            && self.standard_offsets.first() == self.wall_offsets.first()
    }

    #[must_use]
    pub fn standard_transitions(&self) -> &[i64] {
        &self.standard_transitions
    }

    #[must_use]
    pub fn standard_offsets(&self) -> &[UtcOffset] {
        &self.standard_offsets
    }

    #[must_use]
    pub fn savings_transitions(&self) -> &[i64] {
        &self.savings_transitions
    }

    #[must_use]
    pub fn wall_offsets(&self) -> &[UtcOffset] {
        &self.wall_offsets
    }

    /// The recurring rules used after the last concrete transition.
    #[must_use]
    pub fn transition_rules(&self) -> &[TransitionRule] {
        &self.last_rules
    }

    /// ## Summary
    /// Materializes every concrete (historical) transition in order.
    ///
    /// Transitions generated from the rules are not included.
    #[must_use]
    pub fn all_transitions(&self) -> Vec<TransitionRecord> {
        (0..self.savings_transitions.len())
            .map(|i| self.transition_at_index(i))
            .collect()
    }

    /// Concrete transition `index`, which must be in bounds.
    pub(crate) fn transition_at_index(&self, index: usize) -> TransitionRecord {
        TransitionRecord::from_local_in_range(
            self.local_before_at_index(index),
            self.wall_offsets[index],
            self.wall_offsets[index + 1],
        )
    }

    fn local_before_at_index(&self, index: usize) -> NaiveDateTime {
        let (first, second) = (
            self.savings_local_transitions[index * 2],
            self.savings_local_transitions[index * 2 + 1],
        );
        // Gaps store (before, after), everything else (after, before)
        if self.wall_offsets[index + 1] > self.wall_offsets[index] {
            first
        } else {
            second
        }
    }
}

fn push_local_pair(locals: &mut Vec<NaiveDateTime>, trans: &TransitionRecord) {
    if trans.is_gap() {
        locals.push(trans.local_date_time_before());
        locals.push(trans.local_date_time_after());
    } else {
        locals.push(trans.local_date_time_after());
        locals.push(trans.local_date_time_before());
    }
}

fn ensure_rule_count(rules: &[TransitionRule]) -> ValidationResult<()> {
    if rules.len() > MAX_TRANSITION_RULES {
        return Err(ValidationError::TooManyRules(rules.len()));
    }
    Ok(())
}

// Keeps every constructible rule set within what the decoder accepts
fn ensure_transition_count(array: &'static str, values: &[i64]) -> ValidationResult<()> {
    if values.len() > MAX_ENCODED_TRANSITIONS {
        return Err(ValidationError::TooManyTransitions {
            array,
            count: values.len(),
        });
    }
    Ok(())
}

fn ensure_increasing(array: &'static str, values: &[i64]) -> ValidationResult<()> {
    match values.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(index) => Err(ValidationError::NotIncreasing {
            array,
            index: index + 1,
        }),
        None => Ok(()),
    }
}

fn ensure_length(array: &'static str, expected: usize, found: usize) -> ValidationResult<()> {
    if expected != found {
        return Err(ValidationError::LengthMismatch {
            array,
            expected,
            found,
        });
    }
    Ok(())
}

fn warn_if_discontinuous(base_wall_offset: UtcOffset, transitions: &[TransitionRecord]) {
    let mut previous = base_wall_offset;
    for (index, trans) in transitions.iter().enumerate() {
        if trans.offset_before() != previous {
            tracing::warn!(
                index,
                expected = %previous,
                found = %trans.offset_before(),
                "Transition does not start from the preceding offset"
            );
        }
        previous = trans.offset_after();
    }
}

impl Clone for RuleSet {
    fn clone(&self) -> Self {
        Self {
            standard_transitions: self.standard_transitions.clone(),
            standard_offsets: self.standard_offsets.clone(),
            savings_transitions: self.savings_transitions.clone(),
            wall_offsets: self.wall_offsets.clone(),
            savings_local_transitions: self.savings_local_transitions.clone(),
            last_rules: self.last_rules.clone(),
            cache: self.cache.empty_copy(),
        }
    }
}

impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.standard_transitions == other.standard_transitions
            && self.standard_offsets == other.standard_offsets
            && self.savings_transitions == other.savings_transitions
            && self.wall_offsets == other.wall_offsets
            && self.last_rules == other.last_rules
    }
}

impl Eq for RuleSet {}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("standard_transitions", &self.standard_transitions)
            .field("standard_offsets", &self.standard_offsets)
            .field("savings_transitions", &self.savings_transitions)
            .field("wall_offsets", &self.wall_offsets)
            .field("last_rules", &self.last_rules)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.standard_offsets.last() {
            Some(current) => write!(f, "RuleSet[currentStandardOffset={current}]"),
            None => f.write_str("RuleSet[]"),
        }
    }
}
