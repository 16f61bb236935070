//! Summaries of loaded zone data.

use chrono::NaiveDate;
use zonerules_rules::zone::{RuleSet, TransitionRecord, ZoneRulesProvider};

/// ## Summary
/// Logs one line per zone: versions, whether it is fixed and its size.
///
/// ## Errors
/// Returns an error if a zone listed by the provider cannot be resolved.
pub fn summarize(provider: &impl ZoneRulesProvider) -> anyhow::Result<()> {
    for zone_id in provider.zone_ids() {
        let versions = provider.versions(&zone_id)?;
        let rules = provider.rules(&zone_id)?;
        tracing::info!(
            zone = %zone_id,
            versions = versions.len(),
            fixed = rules.is_fixed_offset(),
            transitions = rules.savings_transitions().len(),
            rules = rules.transition_rules().len(),
            current = %rules,
            "Zone loaded"
        );
    }
    Ok(())
}

/// ## Summary
/// Collects every transition from the start of `from_year` up to the end of
/// `to_year`, both as UTC years.
#[must_use]
pub fn transitions_between(rules: &RuleSet, from_year: i32, to_year: i32) -> Vec<TransitionRecord> {
    let (Some(start), Some(end)) = (year_start(from_year), year_start(to_year.saturating_add(1)))
    else {
        return Vec::new();
    };

    let mut found = Vec::new();
    let mut cursor = start - 1;
    while let Some(trans) = rules.next_transition(cursor) {
        if trans.epoch_second() >= end {
            break;
        }
        found.push(trans);
        cursor = trans.epoch_second();
    }
    found
}

fn year_start(year: i32) -> Option<i64> {
    Some(
        NaiveDate::from_ymd_opt(year, 1, 1)?
            .and_hms_opt(0, 0, 0)?
            .and_utc()
            .timestamp(),
    )
}

/// ## Summary
/// Logs every transition of `zone_id` inside the report window.
///
/// ## Errors
/// Returns an error if the provider does not know `zone_id`.
pub fn report_zone(
    provider: &impl ZoneRulesProvider,
    zone_id: &str,
    from_year: i32,
    to_year: i32,
) -> anyhow::Result<usize> {
    let rules = provider.rules(zone_id)?;
    let transitions = transitions_between(&rules, from_year, to_year);
    for trans in &transitions {
        tracing::info!(
            zone = %zone_id,
            epoch_second = trans.epoch_second(),
            daylight_savings = rules.is_daylight_savings(trans.epoch_second()),
            "{trans}"
        );
    }
    tracing::info!(
        zone = %zone_id,
        from_year,
        to_year,
        count = transitions.len(),
        "Report complete"
    );
    Ok(transitions.len())
}
