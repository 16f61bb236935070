//! Offset queries over a [`RuleSet`].
//!
//! Concrete history is searched with binary searches; instants and local
//! readings after the last concrete transition are answered by instantiating
//! the zone's recurring rules for the relevant year. Those per-year
//! instantiations are memoized inside the rule set.
//!
//! Every query is a pure function of the rule set and its argument; the
//! memoization never changes an answer.

pub(crate) mod cache;
mod instant;
mod local;
mod year;

use std::sync::Arc;

pub use local::ResolvedLocal;
pub use year::year_of_epoch_second;

use crate::zone::core::{RuleSet, TransitionRecord, UtcOffset};

impl RuleSet {
    /// Transitions the recurring rules produce for `year`, in rule order.
    fn year_transitions(&self, year: i32) -> Arc<[TransitionRecord]> {
        self.cache.get_or_compute(year, || {
            self.last_rules
                .iter()
                .map(|rule| rule.instantiate(year))
                .collect()
        })
    }

    /// Wall offset in force after the last concrete transition.
    fn last_wall_offset(&self) -> UtcOffset {
        self.wall_offsets.last().copied().unwrap_or(UtcOffset::UTC)
    }
}
