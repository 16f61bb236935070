//! Decode-time format errors.

use thiserror::Error;

use crate::zone::core::ValidationError;

/// The byte stream is not a valid encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unknown payload type tag {0}")]
    UnknownTag(u8),

    #[error("Transition count {count} exceeds the limit of 1024")]
    TooManyTransitions { count: i32 },

    #[error("Rule count {0} exceeds the limit of 16")]
    TooManyRules(u8),

    #[error("Truncated input: needed {needed} more bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("{0} unexpected bytes after the payload")]
    TrailingBytes(usize),

    #[error("Invalid {field} value {value}")]
    InvalidField { field: &'static str, value: i64 },

    #[error("Payload is not of the requested kind")]
    UnexpectedPayload,

    #[error("Decoded values are invalid: {0}")]
    Invalid(#[from] ValidationError),
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;
