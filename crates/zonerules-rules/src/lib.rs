//! Time-zone rule resolution engine.
//!
//! A [`zone::RuleSet`] describes one zone: its concrete historical offset
//! changes plus the recurring yearly rules that govern everything after the
//! last of them. The resolver answers which offset applies at an instant or
//! at a local wall-clock reading (including gaps and overlaps), and the codec
//! stores rule sets in a compact, byte-stable binary form.
//!
//! ## Submodules
//!
//! - [`zone::core`] - Value types (`UtcOffset`, `TransitionRecord`, `TransitionRule`, `RuleSet`)
//! - [`zone::resolve`] - Instant and local date-time queries
//! - [`zone::codec`] - Binary encoding and decoding
//! - [`zone::provider`] - Zone id to rule set lookup

pub mod error;
pub mod zone;

pub use error::{RulesError, RulesResult};
