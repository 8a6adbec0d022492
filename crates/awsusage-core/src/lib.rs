//! Core types, traits, and utilities for awsusage
//!
//! This crate provides the foundational types, error handling,
//! the record source trait, and number formatting used
//! by all other awsusage crates.

pub mod aggregation_types;
pub mod error;
pub mod humanize;
pub mod provider;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{AwsUsageError, Result};
pub use types::{Granularity, RawRecord, ResourceId, TimeBucket, UsageType, UsageValue};
