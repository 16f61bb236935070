//! Cross-module tests of the zone rules engine.

mod concurrency;
mod helpers;
mod provider;
mod round_trip;
mod year_agreement;
