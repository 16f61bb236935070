//! Decoding of rule sets, transitions and rules.

use bytes::Buf;
use chrono::{Month, NaiveTime, Weekday};
use zonerules_core::constants::{
    MAX_ENCODED_TRANSITIONS, MAX_TRANSITION_RULES, QUARTER_HOUR_SECONDS,
};

use super::compact::{get_epoch_second, get_i32, get_offset, get_u8, get_u32};
use super::error::{CodecError, CodecResult};
use super::packed::{SAVINGS_ESCAPE, STANDARD_ESCAPE, TIME_END_OF_DAY, TIME_ESCAPE, unpack};
use crate::zone::core::{RuleSet, TimeDefinition, TransitionRecord, TransitionRule, UtcOffset};

const SECONDS_PER_DAY: i32 = 86_400;

pub(super) fn get_rule_set(buf: &mut impl Buf) -> CodecResult<RuleSet> {
    let standard_count = get_count(buf)?;
    let standard_transitions = (0..standard_count)
        .map(|_| get_epoch_second(buf))
        .collect::<CodecResult<Vec<_>>>()?;
    let standard_offsets = (0..=standard_count)
        .map(|_| get_offset(buf))
        .collect::<CodecResult<Vec<_>>>()?;

    let savings_count = get_count(buf)?;
    let savings_transitions = (0..savings_count)
        .map(|_| get_epoch_second(buf))
        .collect::<CodecResult<Vec<_>>>()?;
    let wall_offsets = (0..=savings_count)
        .map(|_| get_offset(buf))
        .collect::<CodecResult<Vec<_>>>()?;

    let rule_count = get_u8(buf)?;
    if usize::from(rule_count) > MAX_TRANSITION_RULES {
        return Err(CodecError::TooManyRules(rule_count));
    }
    let rules = (0..rule_count)
        .map(|_| get_rule(buf))
        .collect::<CodecResult<Vec<_>>>()?;

    Ok(RuleSet::from_arrays(
        standard_transitions,
        standard_offsets,
        savings_transitions,
        wall_offsets,
        rules,
    )?)
}

/// Reads a transition array length and checks it against the limit.
fn get_count(buf: &mut impl Buf) -> CodecResult<usize> {
    let count = get_i32(buf)?;
    match usize::try_from(count) {
        Ok(len) if len <= MAX_ENCODED_TRANSITIONS => Ok(len),
        Ok(_) => Err(CodecError::TooManyTransitions { count }),
        Err(_) => Err(CodecError::InvalidField {
            field: "transition count",
            value: i64::from(count),
        }),
    }
}

pub(super) fn get_transition(buf: &mut impl Buf) -> CodecResult<TransitionRecord> {
    let epoch_second = get_epoch_second(buf)?;
    let offset_before = get_offset(buf)?;
    let offset_after = get_offset(buf)?;
    Ok(TransitionRecord::new(epoch_second, offset_before, offset_after)?)
}

pub(super) fn get_rule(buf: &mut impl Buf) -> CodecResult<TransitionRule> {
    let header = unpack(get_u32(buf)?);

    let month = Month::try_from(header.month).map_err(|_e| CodecError::InvalidField {
        field: "month",
        value: i64::from(header.month),
    })?;
    let day_of_month_indicator = i8::try_from(i16::from(header.day_of_month) - 32)
        .map_err(|_e| CodecError::InvalidField {
            field: "day of month",
            value: i64::from(header.day_of_month),
        })?;
    let day_of_week = match header.day_of_week {
        0 => None,
        dow => Some(Weekday::try_from(dow - 1).map_err(|_e| CodecError::InvalidField {
            field: "day of week",
            value: i64::from(dow),
        })?),
    };
    let time_definition =
        TimeDefinition::from_ordinal(header.time_definition).ok_or(CodecError::InvalidField {
            field: "time definition",
            value: i64::from(header.time_definition),
        })?;

    let time = match header.time {
        TIME_ESCAPE => second_of_day(get_i32(buf)?)?,
        TIME_END_OF_DAY => NaiveTime::MIN,
        hour => NaiveTime::from_hms_opt(u32::from(hour), 0, 0).ok_or(CodecError::InvalidField {
            field: "hour",
            value: i64::from(hour),
        })?,
    };
    let standard_seconds = if header.standard_offset == STANDARD_ESCAPE {
        get_i32(buf)?
    } else {
        (i32::from(header.standard_offset) - 128) * QUARTER_HOUR_SECONDS
    };
    let standard_offset = UtcOffset::from_seconds(standard_seconds)?;
    let offset_before = get_savings_offset(buf, header.offset_before, standard_seconds)?;
    let offset_after = get_savings_offset(buf, header.offset_after, standard_seconds)?;

    Ok(TransitionRule::new(
        month,
        day_of_month_indicator,
        day_of_week,
        time,
        header.time == TIME_END_OF_DAY,
        time_definition,
        standard_offset,
        offset_before,
        offset_after,
    )?)
}

fn second_of_day(seconds: i32) -> CodecResult<NaiveTime> {
    u32::try_from(seconds)
        .ok()
        .filter(|_| seconds < SECONDS_PER_DAY)
        .and_then(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, 0))
        .ok_or(CodecError::InvalidField {
            field: "second of day",
            value: i64::from(seconds),
        })
}

fn get_savings_offset(
    buf: &mut impl Buf,
    field: u8,
    standard_seconds: i32,
) -> CodecResult<UtcOffset> {
    let seconds = if field == SAVINGS_ESCAPE {
        get_i32(buf)?
    } else {
        standard_seconds + i32::from(field) * 1800
    };
    Ok(UtcOffset::from_seconds(seconds)?)
}
