//! Shared rule sets under concurrent readers.

use std::sync::Arc;

use zonerules_test::fixtures::{local, new_york, paris};
use zonerules_test::zone::RuleSet;

use super::helpers::sample_instants;

fn answer(rules: &RuleSet, epoch_second: i64) -> (i32, bool) {
    (
        rules.offset_at_instant(epoch_second).seconds(),
        rules.is_daylight_savings(epoch_second),
    )
}

#[test]
fn concurrent_readers_see_uncached_answers() {
    for rules in [paris(), new_york()] {
        let instants: Vec<i64> = sample_instants().collect();
        let cold = rules.clone();
        let expected: Vec<_> = instants.iter().map(|&s| answer(&cold, s)).collect();
        let shared = Arc::new(rules);

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let shared = Arc::clone(&shared);
                let (instants, expected) = (&instants, &expected);
                scope.spawn(move || {
                    // Start at different points so cache misses race
                    let start = worker * 601 % instants.len();
                    for step in 0..instants.len() {
                        let index = (start + step) % instants.len();
                        assert_eq!(answer(&shared, instants[index]), expected[index]);
                    }

                    for year in (2000..2100).rev() {
                        let dt = local(year, 7, 1, 12, 0);
                        assert_eq!(shared.valid_offsets_at_local_datetime(dt).len(), 1);
                    }
                });
            }
        });
    }
}

#[test]
fn concurrent_misses_for_one_year_agree() {
    let rules = paris();
    // 2050-07-01T00:00:00Z
    let summer = 2_540_246_400_i64;
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                scope.spawn(|| (rules.offset_at_instant(summer), rules.next_transition(summer)))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(results[0].0.seconds(), 7200);
}
