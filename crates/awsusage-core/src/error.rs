//! Error types for awsusage
//!
//! This module defines the error types used throughout the awsusage crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use awsusage_core::error::{AwsUsageError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to AwsUsageError
//!     let _file = std::fs::read_to_string("nonexistent.csv")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::ResourceId;

/// Main error type for awsusage operations
///
/// Every variant except [`AwsUsageError::NoData`] aborts the run. `NoData`
/// is the one condition callers report as a plain message.
#[derive(Error, Debug)]
pub enum AwsUsageError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A usage report could not be opened or read
    #[error("Cannot read report {}: {source}", path.display())]
    ReadReport {
        /// Path of the report
        path: PathBuf,
        /// Underlying IO failure
        source: std::io::Error,
    },

    /// Report header row lacks columns the pipeline depends on
    #[error("Report {} is missing required columns: {}", file.display(), columns.join(", "))]
    MissingColumns {
        /// The report that was checked
        file: PathBuf,
        /// Quoted names of the absent columns
        columns: Vec<String>,
    },

    /// Malformed CSV content
    #[error("Malformed report {}: {error}", file.display())]
    Format {
        /// The report that failed to parse
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Start time column did not match `MM/DD/YY HH:MM:SS`
    #[error("Invalid start time '{value}': {error}")]
    InvalidTimestamp {
        /// Raw column value
        value: String,
        /// The error message
        error: String,
    },

    /// Usage value column is not a number of the expected kind
    #[error("Invalid usage value '{value}' for resource {resource}")]
    InvalidUsageValue {
        /// Resource the record belongs to
        resource: ResourceId,
        /// Raw column value
        value: String,
    },

    /// Summed usage no longer fits the value type
    #[error("Usage total overflows at resource {resource}; try --decimal")]
    UsageOverflow {
        /// Resource whose record pushed the total past the limit
        resource: ResourceId,
    },

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Nothing survived filtering
    #[error("No data in specified period.")]
    NoData,
}

/// Convenience type alias for Results in awsusage
///
/// # Example
///
/// ```
/// use awsusage_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, AwsUsageError>;
