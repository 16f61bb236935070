//! Compact binary form of rule sets, transitions and rules.
//!
//! Every encoding starts with a one-byte type tag selecting the payload kind,
//! followed by that kind's body. All multi-byte integers are big-endian.
//!
//! ```text
//! RuleSet    := stdCount:i32 EpochSec[stdCount] Offset[stdCount+1]
//!               savCount:i32 EpochSec[savCount] Offset[savCount+1]
//!               ruleCount:u8 Rule[ruleCount]
//! Transition := EpochSec Offset Offset
//! Rule       := header:u32 [second-of-day:i32] [standard:i32] [before:i32] [after:i32]
//! ```
//!
//! See the `compact` and `packed` submodules for the field encodings.

mod build;
mod compact;
mod error;
mod packed;
mod parse;

use bytes::Buf;

pub use error::{CodecError, CodecResult};

use crate::zone::core::{RuleSet, TransitionRecord, TransitionRule};

const RULE_SET_TAG: u8 = 1;
const TRANSITION_TAG: u8 = 2;
const RULE_TAG: u8 = 3;

/// Anything that can be stored with [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    RuleSet(RuleSet),
    Transition(TransitionRecord),
    Rule(TransitionRule),
}

impl Payload {
    const fn tag(&self) -> u8 {
        match self {
            Self::RuleSet(_) => RULE_SET_TAG,
            Self::Transition(_) => TRANSITION_TAG,
            Self::Rule(_) => RULE_TAG,
        }
    }
}

/// Encodes `payload` with its type tag.
#[must_use]
pub fn encode(payload: &Payload) -> Vec<u8> {
    let mut out = vec![payload.tag()];
    match payload {
        Payload::RuleSet(rules) => build::put_rule_set(&mut out, rules),
        Payload::Transition(trans) => build::put_transition(&mut out, trans),
        Payload::Rule(rule) => build::put_rule(&mut out, rule),
    }
    out
}

/// Encodes a rule set with its type tag.
#[must_use]
pub fn encode_rules(rules: &RuleSet) -> Vec<u8> {
    let mut out = vec![RULE_SET_TAG];
    build::put_rule_set(&mut out, rules);
    out
}

/// ## Summary
/// Decodes one tagged payload occupying all of `bytes`.
///
/// ## Errors
/// Returns a [`CodecError`] for an unknown tag, counts over their limits,
/// truncated input, leftover bytes after the payload, or decoded values
/// that fail validation.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> CodecResult<Payload> {
    let mut buf = bytes;
    let tag = compact::get_u8(&mut buf)?;
    let payload = match tag {
        RULE_SET_TAG => Payload::RuleSet(parse::get_rule_set(&mut buf)?),
        TRANSITION_TAG => Payload::Transition(parse::get_transition(&mut buf)?),
        RULE_TAG => Payload::Rule(parse::get_rule(&mut buf)?),
        other => return Err(CodecError::UnknownTag(other)),
    };

    if buf.has_remaining() {
        tracing::warn!(remaining = buf.remaining(), "Trailing bytes after payload");
        return Err(CodecError::TrailingBytes(buf.remaining()));
    }

    tracing::debug!(tag, "Decoded payload");
    Ok(payload)
}

/// ## Summary
/// Decodes a payload that must be a rule set.
///
/// ## Errors
/// Returns [`CodecError::UnexpectedPayload`] for any other payload kind, plus
/// the errors of [`decode`].
pub fn decode_rules(bytes: &[u8]) -> CodecResult<RuleSet> {
    match decode(bytes)? {
        Payload::RuleSet(rules) => Ok(rules),
        Payload::Transition(_) | Payload::Rule(_) => Err(CodecError::UnexpectedPayload),
    }
}
