#![expect(clippy::expect_used, reason = "Test helpers fail loudly")]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Sampling instants and local date-times across a wide range
//! - Comparing two rule sets query by query
//! - Scratch zone data directories removed on drop

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, NaiveDateTime};
use zonerules_test::zone::RuleSet;

/// Instants from 1850 to 2150, stepping by a little over 23 days.
pub fn sample_instants() -> impl Iterator<Item = i64> {
    (0..4_800_i64).map(|i| -3_786_825_600 + i * 1_999_993)
}

/// Local readings matching [`sample_instants`], plus the same readings
/// shifted into the hours around typical transitions.
pub fn sample_locals() -> impl Iterator<Item = NaiveDateTime> {
    sample_instants().flat_map(|epoch_second| {
        let base = DateTime::from_timestamp(epoch_second, 0)
            .expect("sample instants are in range")
            .naive_utc();
        [0, 1, 2, 3].map(|hour| base + chrono::TimeDelta::minutes(hour * 60 + 30))
    })
}

/// Asserts that both rule sets answer every sampled query identically.
pub fn assert_same_answers(expected: &RuleSet, actual: &RuleSet) {
    for epoch_second in sample_instants() {
        assert_eq!(
            expected.offset_at_instant(epoch_second),
            actual.offset_at_instant(epoch_second),
            "offset at {epoch_second}"
        );
        assert_eq!(
            expected.is_daylight_savings(epoch_second),
            actual.is_daylight_savings(epoch_second),
            "daylight savings at {epoch_second}"
        );
        assert_eq!(
            expected.next_transition(epoch_second),
            actual.next_transition(epoch_second),
            "next transition after {epoch_second}"
        );
        assert_eq!(
            expected.previous_transition(epoch_second),
            actual.previous_transition(epoch_second),
            "previous transition before {epoch_second}"
        );
    }
    for dt in sample_locals() {
        assert_eq!(
            expected.valid_offsets_at_local_datetime(dt),
            actual.valid_offsets_at_local_datetime(dt),
            "valid offsets at {dt}"
        );
        assert_eq!(
            expected.transition_at_local_datetime(dt),
            actual.transition_at_local_datetime(dt),
            "transition at {dt}"
        );
    }
}

/// Directory under the system temp dir, removed with its contents on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "zonerules-{name}-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&path).expect("create scratch dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `bytes` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, bytes: &[u8]) {
        let target = self.path.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(target, bytes).expect("write scratch file");
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove scratch dir");
        }
    }
}
