//! Support code for the `zonerules` binary.

pub mod report;
