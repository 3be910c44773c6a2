//! Shared fixtures for the RecordIO integration tests, benches, and the
//! golden-file generator.

pub mod fixture;
