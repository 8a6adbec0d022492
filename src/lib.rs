//! awsusage - Chart AWS usage reports by resource over time
//!
//! This library provides functionality to:
//! - Filter report rows by usage type, resource and time window
//! - Aggregate usage per resource into hourly or daily buckets
//! - Rank resources by total usage and align them on a uniform time axis
//! - Build a chart description rendered with plotly
//!
//! # Examples
//!
//! ```no_run
//! use awsusage::pipeline::{ReportConfig, build_chart};
//! use awsusage_chart::{RenderTarget, render};
//! use awsusage_core::types::UsageType;
//! use awsusage_report::ReportLoader;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> awsusage::Result<()> {
//!     let loader = ReportLoader::new(vec!["report.csv".into()])?;
//!     let config = ReportConfig::new(UsageType::new("APS1-DataTransfer-Out-Bytes"));
//!
//!     let chart = build_chart::<u64, _>(&loader, &config, false).await?;
//!     render(&chart, &RenderTarget::Html("usage.html".into()))?;
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod filters;
pub mod pipeline;
pub mod ranking;
pub mod time_axis;

// Re-export commonly used types
pub use awsusage_core::{AwsUsageError, Result};
pub use awsusage_core::{Granularity, ResourceId, TimeBucket, UsageType, UsageValue};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
