//! Per-year memoization of rule instantiations.

use std::sync::{Arc, OnceLock};

use zonerules_core::constants::LAST_CACHED_YEAR;

use crate::zone::core::TransitionRecord;

/// Upper bound on the number of memoized years per rule set.
const MAX_SLOTS: i32 = 500;

/// Lock-free read-through cache of the transitions generated for each year.
///
/// One write-once slot per year from `first_year` up to (excluding)
/// [`LAST_CACHED_YEAR`], at most [`MAX_SLOTS`] of them. Reads of a filled slot never wait; years outside the
/// window are computed on every call.
pub(crate) struct YearCache {
    first_year: i32,
    slots: Box<[OnceLock<Arc<[TransitionRecord]>>]>,
}

impl YearCache {
    /// A cache with no slots, for rule sets without recurring rules.
    pub(crate) fn disabled() -> Self {
        Self {
            first_year: LAST_CACHED_YEAR,
            slots: Box::new([]),
        }
    }

    pub(crate) fn new(first_year: i32) -> Self {
        let first_year = first_year.clamp(LAST_CACHED_YEAR - MAX_SLOTS, LAST_CACHED_YEAR);
        let len = usize::try_from(LAST_CACHED_YEAR - first_year).unwrap_or_default();
        Self {
            first_year,
            slots: (0..len).map(|_| OnceLock::new()).collect(),
        }
    }

    /// A cache covering the same years with every slot empty.
    pub(crate) fn empty_copy(&self) -> Self {
        Self {
            first_year: self.first_year,
            slots: self.slots.iter().map(|_| OnceLock::new()).collect(),
        }
    }

    fn slot(&self, year: i32) -> Option<&OnceLock<Arc<[TransitionRecord]>>> {
        let index = usize::try_from(year.checked_sub(self.first_year)?).ok()?;
        self.slots.get(index)
    }

    /// ## Summary
    /// Returns the transitions for `year`, computing them on a miss.
    ///
    /// Concurrent misses for one year may each compute; the first stored
    /// value is kept and returned to all of them.
    pub(crate) fn get_or_compute(
        &self,
        year: i32,
        compute: impl FnOnce() -> Vec<TransitionRecord>,
    ) -> Arc<[TransitionRecord]> {
        let Some(slot) = self.slot(year) else {
            tracing::trace!(year, cached = false, "Instantiating transition rules");
            return compute().into();
        };
        if let Some(hit) = slot.get() {
            return Arc::clone(hit);
        }

        tracing::trace!(year, cached = true, "Instantiating transition rules");
        let computed: Arc<[TransitionRecord]> = compute().into();
        Arc::clone(slot.get_or_init(|| computed))
    }

    /// Checks whether `year` currently has a stored value.
    pub(crate) fn contains(&self, year: i32) -> bool {
        self.slot(year).is_some_and(|slot| slot.get().is_some())
    }
}
