//! Scenario tests over realistic rule sets.
