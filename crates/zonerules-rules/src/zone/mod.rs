//! Zone rules: value types, resolution, encoding and lookup.

pub mod codec;
pub mod core;
pub mod provider;
pub mod resolve;

#[cfg(test)]
mod tests;

pub use codec::{CodecError, CodecResult, Payload, decode, decode_rules, encode, encode_rules};
pub use self::core::{
    RuleSet, TimeDefinition, Timestamp, TransitionRecord, TransitionRule, UtcOffset,
    ValidationError, ValidationResult,
};
pub use provider::{MemoryProvider, ZoneRulesProvider};
pub use resolve::{ResolvedLocal, year_of_epoch_second};
