//! Encoding of rule sets, transitions and rules.

use bytes::BufMut;
use chrono::Timelike;

use super::compact::{put_epoch_second, put_offset};
use super::packed::{
    RuleHeader, SAVINGS_ESCAPE, STANDARD_ESCAPE, TIME_END_OF_DAY, TIME_ESCAPE, pack,
};
use crate::zone::core::{RuleSet, TransitionRecord, TransitionRule, UtcOffset};

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "Array lengths are bounded by the validated rule set"
)]
pub(super) fn put_rule_set(buf: &mut impl BufMut, rules: &RuleSet) {
    buf.put_i32(rules.standard_transitions().len() as i32);
    for &epoch_second in rules.standard_transitions() {
        put_epoch_second(buf, epoch_second);
    }
    for &offset in rules.standard_offsets() {
        put_offset(buf, offset);
    }

    buf.put_i32(rules.savings_transitions().len() as i32);
    for &epoch_second in rules.savings_transitions() {
        put_epoch_second(buf, epoch_second);
    }
    for &offset in rules.wall_offsets() {
        put_offset(buf, offset);
    }

    buf.put_u8(rules.transition_rules().len() as u8);
    for rule in rules.transition_rules() {
        put_rule(buf, rule);
    }
}

pub(super) fn put_transition(buf: &mut impl BufMut, trans: &TransitionRecord) {
    put_epoch_second(buf, trans.epoch_second());
    put_offset(buf, trans.offset_before());
    put_offset(buf, trans.offset_after());
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Rule fields are validated to fit their header fields"
)]
pub(super) fn put_rule(buf: &mut impl BufMut, rule: &TransitionRule) {
    let second_of_day = rule.local_time().num_seconds_from_midnight();
    let time = if rule.is_midnight_end_of_day() {
        TIME_END_OF_DAY
    } else if second_of_day % 3600 == 0 {
        (second_of_day / 3600) as u8
    } else {
        TIME_ESCAPE
    };

    let standard = rule.standard_offset().seconds();
    let standard_field = if standard % 900 == 0 {
        (standard / 900 + 128) as u8
    } else {
        STANDARD_ESCAPE
    };
    let before_field = savings_field(rule.offset_before(), rule.standard_offset());
    let after_field = savings_field(rule.offset_after(), rule.standard_offset());

    let header = RuleHeader {
        month: rule.month().number_from_month() as u8,
        day_of_month: (rule.day_of_month_indicator() + 32) as u8,
        day_of_week: rule
            .day_of_week()
            .map_or(0, |dow| dow.number_from_monday() as u8),
        time,
        time_definition: rule.time_definition().ordinal(),
        standard_offset: standard_field,
        offset_before: before_field,
        offset_after: after_field,
    };
    buf.put_u32(pack(&header));

    if time == TIME_ESCAPE {
        buf.put_u32(second_of_day);
    }
    if standard_field == STANDARD_ESCAPE {
        buf.put_i32(standard);
    }
    if before_field == SAVINGS_ESCAPE {
        buf.put_i32(rule.offset_before().seconds());
    }
    if after_field == SAVINGS_ESCAPE {
        buf.put_i32(rule.offset_after().seconds());
    }
}

/// Savings of `offset` over `standard` in half hours, if it is 0, 1 or 2.
fn savings_field(offset: UtcOffset, standard: UtcOffset) -> u8 {
    match offset.seconds() - standard.seconds() {
        0 => 0,
        1800 => 1,
        3600 => 2,
        _ => SAVINGS_ESCAPE,
    }
}
