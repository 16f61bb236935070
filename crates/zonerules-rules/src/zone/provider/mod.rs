//! Lookup of rule sets by zone id.
//!
//! A provider maps zone ids such as `Europe/Paris` to their rule sets, keeping
//! every version it knows about. Rule sets are handed out behind [`Arc`] so
//! their memoized rule instantiations are shared by all callers.

mod memory;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use memory::MemoryProvider;

use crate::error::{RulesError, RulesResult};
use crate::zone::core::RuleSet;

/// Source of zone rules, safe to share between threads.
pub trait ZoneRulesProvider: Send + Sync {
    /// All zone ids this provider can answer for, sorted.
    fn zone_ids(&self) -> Vec<String>;

    /// ## Summary
    /// Returns the newest rules for `zone_id`.
    ///
    /// ## Errors
    /// Returns [`RulesError::UnknownZone`] if the zone is not provided.
    fn rules(&self, zone_id: &str) -> RulesResult<Arc<RuleSet>>;

    /// ## Summary
    /// Returns every known version of the rules for `zone_id`, ordered from
    /// oldest to newest by version id.
    ///
    /// ## Errors
    /// Returns [`RulesError::UnknownZone`] if the zone is not provided.
    fn versions(&self, zone_id: &str) -> RulesResult<BTreeMap<String, Arc<RuleSet>>>;

    /// ## Summary
    /// Returns one specific version of the rules for `zone_id`.
    ///
    /// ## Errors
    /// Returns [`RulesError::UnknownZone`] or [`RulesError::UnknownVersion`].
    fn rules_at_version(&self, zone_id: &str, version: &str) -> RulesResult<Arc<RuleSet>> {
        self.versions(zone_id)?
            .remove(version)
            .ok_or_else(|| RulesError::UnknownVersion {
                zone: zone_id.to_string(),
                version: version.to_string(),
            })
    }
}
