//! Calendar year of an instant without building a date.

use zonerules_core::constants::{MAX_RULE_YEAR, MIN_RULE_YEAR};

use crate::zone::core::UtcOffset;

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_CYCLE: i64 = 146_097;
/// Days from 0000-01-01 to 1970-01-01 in the proleptic Gregorian calendar.
const DAYS_0000_TO_1970: i64 = DAYS_PER_CYCLE * 5 - (30 * 365 + 7);

/// ## Summary
/// Returns the proleptic Gregorian year of the local reading of
/// `epoch_second` under `offset`.
///
/// Uses the 400-year cycle on a calendar starting each year on March 1st, so
/// the leap day is the last day of its year. The result is clamped to the
/// range recurring rules are instantiated for.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "The year is clamped to the i32 rule year range first"
)]
pub fn year_of_epoch_second(epoch_second: i64, offset: UtcOffset) -> i32 {
    let local_second = epoch_second.saturating_add(i64::from(offset.seconds()));
    let mut zero_day = local_second.div_euclid(SECONDS_PER_DAY) + DAYS_0000_TO_1970;
    // Shift to 0000-03-01
    zero_day -= 60;

    let mut adjust = 0;
    if zero_day < 0 {
        // Move negative years into positive cycles for the estimate
        let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
        adjust = adjust_cycles * 400;
        zero_day -= adjust_cycles * DAYS_PER_CYCLE;
    }

    let mut year_est = (400 * zero_day + 591) / DAYS_PER_CYCLE;
    let mut doy_est = zero_day - days_before_march_year(year_est);
    if doy_est < 0 {
        year_est -= 1;
        doy_est = zero_day - days_before_march_year(year_est);
    }
    year_est += adjust;

    // January and February belong to the next January-based year
    let march_month0 = (doy_est * 5 + 2) / 153;
    year_est += march_month0 / 10;

    year_est.clamp(i64::from(MIN_RULE_YEAR), i64::from(MAX_RULE_YEAR)) as i32
}

/// Days from 0000-03-01 to March 1st of the March-based `year`.
const fn days_before_march_year(year: i64) -> i64 {
    365 * year + year / 4 - year / 100 + year / 400
}
