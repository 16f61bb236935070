//! Zone rule value types.
//!
//! Everything here is immutable once built. Constructors validate their
//! inputs and report a [`ValidationError`] rather than correcting them.

mod error;
mod offset;
mod rule;
mod rules;
mod timestamp;
mod transition;

pub use error::{ValidationError, ValidationResult};
pub use offset::UtcOffset;
pub use rule::{TimeDefinition, TransitionRule};
pub use rules::RuleSet;
pub use timestamp::Timestamp;
pub use transition::TransitionRecord;
