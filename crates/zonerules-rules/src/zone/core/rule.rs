//! Recurring yearly transition rules.

use std::fmt;

use chrono::{Datelike, Days, Month, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};
use zonerules_core::constants::{MAX_RULE_YEAR, MIN_RULE_YEAR};

use super::error::{ValidationError, ValidationResult};
use super::offset::UtcOffset;
use super::transition::TransitionRecord;

/// How the local time of a rule is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeDefinition {
    /// The time is UTC.
    Utc,
    /// The time is the wall clock in force just before the transition.
    Wall,
    /// The time is in standard (non-daylight) time.
    Standard,
}

impl TimeDefinition {
    /// Position used by the packed binary encoding.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Utc => 0,
            Self::Wall => 1,
            Self::Standard => 2,
        }
    }

    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Utc),
            1 => Some(Self::Wall),
            2 => Some(Self::Standard),
            _ => None,
        }
    }

    /// ## Summary
    /// Converts a local reading under this definition to the wall-clock reading
    /// under `wall_offset`.
    #[must_use]
    pub fn to_wall_local(
        self,
        local: NaiveDateTime,
        standard_offset: UtcOffset,
        wall_offset: UtcOffset,
    ) -> NaiveDateTime {
        let difference = match self {
            Self::Utc => wall_offset.seconds(),
            Self::Standard => wall_offset.seconds() - standard_offset.seconds(),
            Self::Wall => return local,
        };
        local + TimeDelta::seconds(i64::from(difference))
    }

    /// ## Summary
    /// Converts a local reading under this definition to an epoch second.
    #[must_use]
    pub fn to_instant(
        self,
        local: NaiveDateTime,
        standard_offset: UtcOffset,
        wall_offset: UtcOffset,
    ) -> i64 {
        self.to_wall_local(local, standard_offset, wall_offset)
            .and_utc()
            .timestamp()
            - i64::from(wall_offset.seconds())
    }
}

impl fmt::Display for TimeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utc => "UTC",
            Self::Wall => "WALL",
            Self::Standard => "STANDARD",
        })
    }
}

/// A yearly recurring transition, such as "last Sunday in October at 01:00 UTC".
///
/// Rules describe the transitions after the last concrete one in a
/// [`RuleSet`](super::RuleSet) and can produce a [`TransitionRecord`] for any year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionRule {
    month: Month,
    day_of_month_indicator: i8,
    day_of_week: Option<Weekday>,
    time: NaiveTime,
    time_end_of_day: bool,
    time_definition: TimeDefinition,
    standard_offset: UtcOffset,
    offset_before: UtcOffset,
    offset_after: UtcOffset,
}

impl TransitionRule {
    /// ## Summary
    /// Creates a rule.
    ///
    /// A positive `day_of_month_indicator` means "on or after that day", a
    /// negative one counts back from the month end (`-1` is the last day), and
    /// `day_of_week` then moves the date to the matching weekday in that
    /// direction. `time_end_of_day` selects 24:00, i.e. midnight of the next day.
    ///
    /// ## Errors
    /// Returns a [`ValidationError`] if the indicator is outside `-28..=31` or zero,
    /// if the time has a sub-second part, or if `time_end_of_day` is set with a
    /// time other than midnight.
    #[expect(
        clippy::too_many_arguments,
        reason = "Each argument is a distinct field of the rule"
    )]
    pub fn new(
        month: Month,
        day_of_month_indicator: i8,
        day_of_week: Option<Weekday>,
        time: NaiveTime,
        time_end_of_day: bool,
        time_definition: TimeDefinition,
        standard_offset: UtcOffset,
        offset_before: UtcOffset,
        offset_after: UtcOffset,
    ) -> ValidationResult<Self> {
        if !(-28..=31).contains(&day_of_month_indicator) || day_of_month_indicator == 0 {
            return Err(ValidationError::DayOfMonthIndicator(day_of_month_indicator));
        }
        if time.nanosecond() != 0 {
            return Err(ValidationError::SubSecondPrecision);
        }
        if time_end_of_day && time != NaiveTime::MIN {
            return Err(ValidationError::EndOfDayNotMidnight(time));
        }
        Ok(Self {
            month,
            day_of_month_indicator,
            day_of_week,
            time,
            time_end_of_day,
            time_definition,
            standard_offset,
            offset_before,
            offset_after,
        })
    }

    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    #[must_use]
    pub const fn day_of_month_indicator(&self) -> i8 {
        self.day_of_month_indicator
    }

    #[must_use]
    pub const fn day_of_week(&self) -> Option<Weekday> {
        self.day_of_week
    }

    /// Local time of day; midnight when [`Self::is_midnight_end_of_day`] is set.
    #[must_use]
    pub const fn local_time(&self) -> NaiveTime {
        self.time
    }

    #[must_use]
    pub const fn is_midnight_end_of_day(&self) -> bool {
        self.time_end_of_day
    }

    #[must_use]
    pub const fn time_definition(&self) -> TimeDefinition {
        self.time_definition
    }

    #[must_use]
    pub const fn standard_offset(&self) -> UtcOffset {
        self.standard_offset
    }

    #[must_use]
    pub const fn offset_before(&self) -> UtcOffset {
        self.offset_before
    }

    #[must_use]
    pub const fn offset_after(&self) -> UtcOffset {
        self.offset_after
    }

    /// ## Summary
    /// Produces the concrete transition this rule describes for `year`.
    ///
    /// Years outside the supported calendar range are clamped to it.
    #[must_use]
    pub fn instantiate(&self, year: i32) -> TransitionRecord {
        let year = year.clamp(MIN_RULE_YEAR, MAX_RULE_YEAR);
        let mut date = self.candidate_date(year);
        if self.time_end_of_day {
            date = date + Days::new(1);
        }
        let local = self.time_definition.to_wall_local(
            date.and_time(self.time),
            self.standard_offset,
            self.offset_before,
        );
        TransitionRecord::from_local_in_range(local, self.offset_before, self.offset_after)
    }

    /// Date of the transition in `year` before any end-of-day adjustment.
    fn candidate_date(&self, year: i32) -> NaiveDate {
        #[expect(clippy::expect_used, reason = "Years are clamped before this point")]
        let first = NaiveDate::from_ymd_opt(year, self.month.number_from_month(), 1)
            .expect("rule years are clamped inside the calendar range");
        let indicator = self.day_of_month_indicator;

        if indicator < 0 {
            let last = first + Months::new(1) - Days::new(1);
            let date = last - Days::new(u64::from(indicator.unsigned_abs() - 1));
            match self.day_of_week {
                Some(dow) => previous_or_same(date, dow),
                None => date,
            }
        } else {
            // Days past the month end roll into the next month (Feb 29 -> Mar 1)
            let date = first + Days::new(u64::from(indicator.unsigned_abs() - 1));
            match self.day_of_week {
                Some(dow) => next_or_same(date, dow),
                None => date,
            }
        }
    }
}

/// First date on or after `date` falling on `dow`.
fn next_or_same(date: NaiveDate, dow: Weekday) -> NaiveDate {
    let ahead = (7 + dow.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date + Days::new(u64::from(ahead))
}

/// Last date on or before `date` falling on `dow`.
fn previous_or_same(date: NaiveDate, dow: Weekday) -> NaiveDate {
    let behind = (7 + date.weekday().num_days_from_monday() - dow.num_days_from_monday()) % 7;
    date - Days::new(u64::from(behind))
}

const fn weekday_name(dow: Weekday) -> &'static str {
    match dow {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl fmt::Display for TransitionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.offset_after > self.offset_before {
            "Gap"
        } else {
            "Overlap"
        };
        write!(
            f,
            "TransitionRule[{kind} {} to {}, ",
            self.offset_before, self.offset_after
        )?;

        let month = self.month.name();
        let indicator = self.day_of_month_indicator;
        match self.day_of_week {
            Some(dow) if indicator == -1 => {
                write!(f, "{} on or before last day of {month}", weekday_name(dow))?;
            }
            Some(dow) if indicator < 0 => write!(
                f,
                "{} on or before last day minus {} of {month}",
                weekday_name(dow),
                -indicator - 1
            )?,
            Some(dow) => write!(f, "{} on or after {month} {indicator}", weekday_name(dow))?,
            None => write!(f, "{month} {indicator}")?,
        }

        if self.time_end_of_day {
            f.write_str(" at 24:00")?;
        } else if self.time.second() == 0 {
            write!(f, " at {}", self.time.format("%H:%M"))?;
        } else {
            write!(f, " at {}", self.time.format("%H:%M:%S"))?;
        }
        write!(
            f,
            " {}, standard offset {}]",
            self.time_definition, self.standard_offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(h: i32) -> UtcOffset {
        UtcOffset::from_hms(h, 0, 0).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn local(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    fn last_sunday_october_wall() -> TransitionRule {
        TransitionRule::new(
            Month::October,
            -1,
            Some(Weekday::Sun),
            hm(1, 0),
            false,
            TimeDefinition::Wall,
            hours(1),
            hours(2),
            hours(1),
        )
        .unwrap()
    }

    #[test]
    fn test_last_sunday_of_october() {
        let rule = last_sunday_october_wall();
        assert_eq!(
            rule.instantiate(2023).local_date_time_before(),
            local(2023, 10, 29, 1, 0)
        );
        assert_eq!(
            rule.instantiate(2024).local_date_time_before(),
            local(2024, 10, 27, 1, 0)
        );
    }

    #[test]
    fn test_utc_time_definition() {
        // Europe/Paris: last Sunday in March at 01:00 UTC
        let rule = TransitionRule::new(
            Month::March,
            25,
            Some(Weekday::Sun),
            hm(1, 0),
            false,
            TimeDefinition::Utc,
            hours(1),
            hours(1),
            hours(2),
        )
        .unwrap();
        let trans = rule.instantiate(2023);
        assert_eq!(trans.local_date_time_before(), local(2023, 3, 26, 2, 0));
        assert_eq!(trans.epoch_second(), 1_679_792_400);
        assert!(trans.is_gap());
    }

    #[test]
    fn test_standard_time_definition() {
        // 02:00 standard time while daylight time (+1h) is in force is 03:00 wall
        let rule = TransitionRule::new(
            Month::October,
            -1,
            Some(Weekday::Sun),
            hm(2, 0),
            false,
            TimeDefinition::Standard,
            hours(1),
            hours(2),
            hours(1),
        )
        .unwrap();
        assert_eq!(
            rule.instantiate(2023).local_date_time_before(),
            local(2023, 10, 29, 3, 0)
        );
    }

    #[test]
    fn test_end_of_day_moves_to_next_date() {
        let rule = TransitionRule::new(
            Month::March,
            -1,
            Some(Weekday::Sat),
            NaiveTime::MIN,
            true,
            TimeDefinition::Wall,
            hours(2),
            hours(2),
            hours(3),
        )
        .unwrap();
        // Last Saturday of March 2024 is the 30th; 24:00 is the 31st at 00:00
        assert_eq!(
            rule.instantiate(2024).local_date_time_before(),
            local(2024, 3, 31, 0, 0)
        );
    }

    #[test]
    fn test_feb_29_rolls_to_march_in_common_year() {
        let rule = TransitionRule::new(
            Month::February,
            29,
            None,
            hm(2, 0),
            false,
            TimeDefinition::Wall,
            hours(0),
            hours(0),
            hours(1),
        )
        .unwrap();
        assert_eq!(
            rule.instantiate(2023).local_date_time_before(),
            local(2023, 3, 1, 2, 0)
        );
        assert_eq!(
            rule.instantiate(2024).local_date_time_before(),
            local(2024, 2, 29, 2, 0)
        );
    }

    #[test]
    fn test_negative_indicator_counts_back_from_month_end() {
        // Sunday on or before the 3rd-to-last day of February
        let rule = TransitionRule::new(
            Month::February,
            -3,
            Some(Weekday::Sun),
            hm(0, 0),
            false,
            TimeDefinition::Wall,
            hours(0),
            hours(0),
            hours(1),
        )
        .unwrap();
        // 2024-02-27 is a Tuesday, previous Sunday is the 25th
        assert_eq!(
            rule.instantiate(2024).local_date_time_before(),
            local(2024, 2, 25, 0, 0)
        );
    }

    #[test]
    fn test_validation_errors() {
        let make = |dom: i8, time: NaiveTime, eod: bool| {
            TransitionRule::new(
                Month::April,
                dom,
                None,
                time,
                eod,
                TimeDefinition::Wall,
                hours(0),
                hours(0),
                hours(1),
            )
        };
        assert_eq!(
            make(0, hm(1, 0), false),
            Err(ValidationError::DayOfMonthIndicator(0))
        );
        assert_eq!(
            make(-29, hm(1, 0), false),
            Err(ValidationError::DayOfMonthIndicator(-29))
        );
        assert_eq!(
            make(32, hm(1, 0), false),
            Err(ValidationError::DayOfMonthIndicator(32))
        );
        assert_eq!(
            make(1, hm(1, 0), true),
            Err(ValidationError::EndOfDayNotMidnight(hm(1, 0)))
        );
        assert_eq!(
            make(1, NaiveTime::from_hms_nano_opt(1, 0, 0, 1).unwrap(), false),
            Err(ValidationError::SubSecondPrecision)
        );
    }

    #[test]
    fn test_instantiate_clamps_extreme_years() {
        let rule = last_sunday_october_wall();
        let trans = rule.instantiate(i32::MAX);
        assert_eq!(trans.local_date_time_before().year(), MAX_RULE_YEAR);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            last_sunday_october_wall().to_string(),
            "TransitionRule[Overlap +02:00 to +01:00, Sunday on or before last day of October at 01:00 WALL, standard offset +01:00]"
        );
    }
}
