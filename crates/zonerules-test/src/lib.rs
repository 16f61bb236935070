//! Zone rules - integration test support.
//!
//! Fixtures shaped like real zones, shared by the integration tests.

pub use zonerules_rules::{RulesError, zone};

pub mod fixtures {
    #![expect(
        clippy::expect_used,
        clippy::missing_panics_doc,
        reason = "Fixture data is known to be valid"
    )]

    use chrono::{Month, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
    use zonerules_rules::zone::{RuleSet, TimeDefinition, TransitionRecord, TransitionRule, UtcOffset};

    #[must_use]
    pub fn hours(h: i32) -> UtcOffset {
        UtcOffset::from_hms(h, 0, 0).expect("whole hours within 18 are valid")
    }

    #[must_use]
    pub fn hm(h: i32, m: i32) -> UtcOffset {
        UtcOffset::from_hms(h, m, 0).expect("offset within 18 hours")
    }

    #[must_use]
    pub fn local(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(hh, mm, 0))
            .expect("valid calendar date-time")
    }

    /// A rule falling on a Sunday at a whole hour.
    fn rule(
        month: Month,
        day_of_month: i8,
        hour: u32,
        definition: TimeDefinition,
        standard: UtcOffset,
        before: UtcOffset,
        after: UtcOffset,
    ) -> TransitionRule {
        TransitionRule::new(
            month,
            day_of_month,
            Some(Weekday::Sun),
            NaiveTime::from_hms_opt(hour, 0, 0).expect("valid hour"),
            false,
            definition,
            standard,
            before,
            after,
        )
        .expect("valid rule")
    }

    /// Central European summer time from 1996 on.
    #[must_use]
    pub fn europe_rules() -> Vec<TransitionRule> {
        vec![
            rule(Month::March, -1, 1, TimeDefinition::Utc, hours(1), hours(1), hours(2)),
            rule(Month::October, -1, 1, TimeDefinition::Utc, hours(1), hours(2), hours(1)),
        ]
    }

    /// US eastern time from 2007 on.
    #[must_use]
    pub fn us_eastern_rules() -> Vec<TransitionRule> {
        vec![
            rule(Month::March, 8, 2, TimeDefinition::Wall, hours(-5), hours(-5), hours(-4)),
            rule(Month::November, 1, 2, TimeDefinition::Wall, hours(-5), hours(-4), hours(-5)),
        ]
    }

    /// Lord Howe Island: half-hour daylight saving on a +10:30 standard offset.
    #[must_use]
    pub fn lord_howe_rules() -> Vec<TransitionRule> {
        vec![
            rule(Month::April, 1, 2, TimeDefinition::Wall, hm(10, 30), hours(11), hm(10, 30)),
            rule(Month::October, 1, 2, TimeDefinition::Wall, hm(10, 30), hm(10, 30), hours(11)),
        ]
    }

    fn history(
        rules: &[TransitionRule],
        years: std::ops::RangeInclusive<i32>,
    ) -> Vec<TransitionRecord> {
        years
            .flat_map(|year| rules.iter().map(move |rule| rule.instantiate(year)))
            .collect()
    }

    /// Paris: local mean time, then CET with concrete summer time for
    /// 1996-2010 and the recurring rules afterwards.
    #[must_use]
    pub fn paris() -> RuleSet {
        let lmt = UtcOffset::from_seconds(561).expect("LMT offset");
        // Midnight local mean time on 1891-03-16
        let to_cet =
            TransitionRecord::new(-2_486_592_561, lmt, hours(1)).expect("valid transition");

        let rules = europe_rules();
        let mut transitions = vec![to_cet];
        transitions.extend(history(&rules, 1996..=2010));
        RuleSet::new(lmt, lmt, &[to_cet], &transitions, rules).expect("valid rule set")
    }

    /// New York: local mean time, then EST with concrete 2007-2012 daylight
    /// saving and the recurring rules afterwards.
    #[must_use]
    pub fn new_york() -> RuleSet {
        let lmt = UtcOffset::from_hms(-4, -56, -2).expect("LMT offset");
        // 1883-11-18T17:00:00Z
        let railway =
            TransitionRecord::new(-2_717_650_800, lmt, hours(-5)).expect("valid transition");

        let rules = us_eastern_rules();
        let mut transitions = vec![railway];
        transitions.extend(history(&rules, 2007..=2012));
        RuleSet::new(lmt, lmt, &[railway], &transitions, rules).expect("valid rule set")
    }

    /// Lord Howe Island driven by its rules only.
    #[must_use]
    pub fn lord_howe() -> RuleSet {
        RuleSet::new(hm(10, 30), hm(10, 30), &[], &[], lord_howe_rules())
            .expect("valid rule set")
    }

    /// Every fixture zone with its id.
    #[must_use]
    pub fn all_zones() -> Vec<(&'static str, RuleSet)> {
        vec![
            ("Europe/Paris", paris()),
            ("America/New_York", new_york()),
            ("Australia/Lord_Howe", lord_howe()),
            ("Etc/UTC", RuleSet::fixed(UtcOffset::UTC)),
            ("Asia/Kolkata", RuleSet::fixed(hm(5, 30))),
        ]
    }
}
