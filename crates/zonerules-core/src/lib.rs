//! Shared constants, configuration and errors for the zone rules workspace.

pub mod config;
pub mod constants;
pub mod error;
