//! Compound crawler binaries: shared config loading and run orchestration.
pub mod platform;
