//! Limits and encoding constants shared by the rules engine and its tools.

/// Largest UTC offset magnitude accepted anywhere, in seconds (18 hours).
pub const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// Maximum number of recurring rules a rule set may carry.
pub const MAX_TRANSITION_RULES: usize = 16;

/// Maximum number of concrete transitions accepted per array when decoding.
pub const MAX_ENCODED_TRANSITIONS: usize = 1024;

/// Rule instantiations for this year and later are computed on every call
/// instead of being memoized.
pub const LAST_CACHED_YEAR: i32 = 2100;

/// First year memoized for rule sets that have no concrete transitions.
pub const DEFAULT_FIRST_CACHED_YEAR: i32 = 1970;

/// Lowest year a recurring rule is instantiated for.
pub const MIN_RULE_YEAR: i32 = -262_000;

/// Highest year a recurring rule is instantiated for.
pub const MAX_RULE_YEAR: i32 = 262_000;

/// Seconds in one quarter hour, the granularity of the compact encodings.
pub const QUARTER_HOUR_SECONDS: i32 = 900;

/// Escape byte preceding a full 4-byte offset.
pub const OFFSET_ESCAPE: i8 = 127;

/// Escape byte preceding a full 8-byte epoch second.
pub const EPOCH_ESCAPE: u8 = 255;

/// Shift applied to epoch seconds before the 3-byte quarter-hour encoding,
/// placing 1825-01-01T00:00Z at zero.
pub const EPOCH_WINDOW_BASE: i64 = 4_575_744_000;

/// Exclusive upper bound of the 3-byte epoch window (2300-01-01T00:00Z).
pub const EPOCH_WINDOW_END: i64 = 10_413_792_000;

/// File extension of encoded rule sets inside a zone data directory.
pub const ENCODED_RULES_EXTENSION: &str = "tzr";
