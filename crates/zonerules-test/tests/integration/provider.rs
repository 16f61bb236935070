//! Loading zone data directories.

use zonerules_core::constants::ENCODED_RULES_EXTENSION;
use zonerules_test::RulesError;
use zonerules_test::fixtures::{all_zones, hours, paris};
use zonerules_test::zone::{MemoryProvider, RuleSet, ZoneRulesProvider, encode_rules};

use super::helpers::ScratchDir;

#[test_log::test]
fn loads_versions_and_nested_zone_ids() {
    let dir = ScratchDir::new("load");
    for (zone_id, rules) in all_zones() {
        dir.write(
            &format!("2024a/{zone_id}.{ENCODED_RULES_EXTENSION}"),
            &encode_rules(&rules),
        );
    }
    dir.write("2023c/Europe/Paris.tzr", &encode_rules(&RuleSet::fixed(hours(1))));
    dir.write("2024a/README.txt", b"not zone data");

    let provider = MemoryProvider::load_directory(dir.path()).unwrap();
    assert_eq!(provider.len(), all_zones().len());
    assert!(provider.zone_ids().contains(&"America/New_York".to_string()));

    let versions = provider.versions("Europe/Paris").unwrap();
    assert_eq!(versions.keys().collect::<Vec<_>>(), vec!["2023c", "2024a"]);
    assert_eq!(*provider.rules("Europe/Paris").unwrap(), paris());
    assert_eq!(
        *provider.rules_at_version("Europe/Paris", "2023c").unwrap(),
        RuleSet::fixed(hours(1))
    );
}

#[test]
fn corrupt_file_fails_the_load() {
    let dir = ScratchDir::new("corrupt");
    dir.write("2024a/Europe/Paris.tzr", &[1, 0, 0]);
    assert!(matches!(
        MemoryProvider::load_directory(dir.path()),
        Err(RulesError::Codec(_))
    ));
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = ScratchDir::new("missing");
    let missing = dir.path().join("does-not-exist");
    assert!(matches!(
        MemoryProvider::load_directory(&missing),
        Err(RulesError::Io { path, .. }) if path == missing
    ));
}

#[test]
fn shared_rules_are_the_same_allocation() {
    let mut provider = MemoryProvider::new();
    provider.insert("Europe/Paris", "2024a", paris());
    let first = provider.rules("Europe/Paris").unwrap();
    let second = provider.rules("Europe/Paris").unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}
