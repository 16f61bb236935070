//! Encoding and decoding realistic zones.

use zonerules_test::fixtures::{all_zones, lord_howe, paris};
use zonerules_test::zone::{Payload, decode, decode_rules, encode, encode_rules};

use super::helpers::assert_same_answers;

#[test_log::test]
fn every_fixture_zone_survives_encoding() {
    for (zone_id, rules) in all_zones() {
        let bytes = encode_rules(&rules);
        let decoded = decode_rules(&bytes).unwrap_or_else(|e| panic!("{zone_id}: {e}"));
        assert_eq!(decoded, rules, "{zone_id}");
        assert_same_answers(&rules, &decoded);
    }
}

#[test]
fn generic_payload_matches_typed_helpers() {
    let rules = paris();
    let bytes = encode(&Payload::RuleSet(rules.clone()));
    assert_eq!(bytes, encode_rules(&rules));
    assert_eq!(decode(&bytes).unwrap(), Payload::RuleSet(rules));
}

#[test]
fn half_hour_savings_stay_compact() {
    let bytes = encode_rules(&lord_howe());
    // Tag, two empty arrays with one offset each, rule count, two header words
    assert_eq!(bytes.len(), 1 + (4 + 1) * 2 + 1 + 4 * 2);
}

#[test]
fn every_transition_and_rule_round_trips_alone() {
    for (zone_id, rules) in all_zones() {
        for trans in rules.all_transitions() {
            let bytes = encode(&Payload::Transition(trans));
            assert_eq!(decode(&bytes).unwrap(), Payload::Transition(trans), "{zone_id}");
        }
        for rule in rules.transition_rules() {
            let bytes = encode(&Payload::Rule(*rule));
            assert_eq!(decode(&bytes).unwrap(), Payload::Rule(*rule), "{zone_id}");
        }
    }
}
