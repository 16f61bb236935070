//! The integer year algorithm agrees with chrono's calendar.

use chrono::{DateTime, Datelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zonerules_test::zone::{UtcOffset, year_of_epoch_second};

/// 1900-01-01T00:00:00Z
const FROM: i64 = -2_208_988_800;
/// 2101-01-01T00:00:00Z
const UNTIL: i64 = 4_133_980_800;

#[test]
fn random_instants_agree_with_chrono() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..10_000 {
        let epoch_second = rng.gen_range(FROM..UNTIL);
        let offset = UtcOffset::from_seconds(rng.gen_range(-64_800..=64_800)).unwrap();

        let local = DateTime::from_timestamp(epoch_second + i64::from(offset.seconds()), 0)
            .unwrap()
            .naive_utc();
        assert_eq!(
            year_of_epoch_second(epoch_second, offset),
            local.year(),
            "{epoch_second} at {offset}"
        );
    }
}

#[test]
fn year_boundaries_agree_with_chrono() {
    for year in 1900..=2100 {
        let start = chrono::NaiveDate::from_ymd_opt(year, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp();
        assert_eq!(year_of_epoch_second(start, UtcOffset::UTC), year);
        assert_eq!(year_of_epoch_second(start - 1, UtcOffset::UTC), year - 1);
    }
}
