//! CLI interface for awsusage
//!
//! This module defines the command-line interface using clap. Report files
//! are positional; every option configures one stage of the pipeline.
//!
//! # Example
//!
//! ```bash
//! # Top 5 resources by outbound transfer in January, as a stacked bar chart
//! awsusage -b -a -l 5 -s 24-01-01 -e 24-02-01 report.csv
//!
//! # Daily NAT gateway bytes, excluding one resource, written to a file
//! awsusage -d -t APS1-NatGateway-Bytes -x nat-0abc -o nat.html report.csv
//! ```

use crate::pipeline::ReportConfig;
use awsusage_chart::{ChartStyle, RenderTarget};
use awsusage_core::error::{AwsUsageError, Result};
use awsusage_core::types::UsageType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use std::path::PathBuf;

/// Usage type charted when none is given
pub const DEFAULT_USAGE_TYPE: &str = "APS1-DataTransfer-Out-Bytes";

/// Chart AWS usage reports by resource over time
#[derive(Parser, Debug, Clone)]
#[command(name = "awsusage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// AWS usage report CSV files
    #[arg(value_name = "REPORTS", required = true)]
    pub reports: Vec<PathBuf>,

    /// Draw a stacked line / bar chart
    #[arg(long, short = 'a')]
    pub stacked: bool,

    /// Draw a bar chart instead of a line chart
    #[arg(long, short = 'b')]
    pub bar_chart: bool,

    /// Force daily buckets even for hourly reports
    #[arg(long, short = 'd')]
    pub daily: bool,

    /// Usage type to chart
    #[arg(
        long,
        short = 't',
        value_name = "TYPE",
        default_value = DEFAULT_USAGE_TYPE,
        env = "AWSUSAGE_USAGE_TYPE"
    )]
    pub usage_type: String,

    /// Number of resources to show; zero or less shows every resource
    #[arg(
        long,
        short = 'l',
        value_name = "N",
        default_value_t = 10,
        allow_negative_numbers = true
    )]
    pub limit: i64,

    /// First day to include (YY-MM-DD or YYYY-MM-DD)
    #[arg(long, short = 's', value_name = "YY-MM-DD")]
    pub start_time: Option<String>,

    /// Day to stop before (YY-MM-DD or YYYY-MM-DD)
    #[arg(long, short = 'e', value_name = "YY-MM-DD")]
    pub end_time: Option<String>,

    /// Resource to leave out; may be repeated
    #[arg(long, short = 'x', value_name = "RESOURCE")]
    pub exclude: Vec<String>,

    /// Parse usage values as decimals instead of integers
    #[arg(long)]
    pub decimal: bool,

    /// Write the chart as HTML to FILE instead of opening a browser
    #[arg(long, short = 'o', value_name = "FILE", env = "AWSUSAGE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Chart style selected by the switches
    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle::from_flags(self.bar_chart, self.stacked)
    }

    /// Where the chart goes
    pub fn render_target(&self) -> RenderTarget {
        match &self.output {
            Some(path) => RenderTarget::Html(path.clone()),
            None => RenderTarget::Browser,
        }
    }

    /// Resolve the arguments into a pipeline configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a date does not parse, or if the start is not
    /// before the end
    pub fn report_config(&self) -> Result<ReportConfig> {
        let since = self
            .start_time
            .as_deref()
            .map(parse_date_filter)
            .transpose()?;
        let until = self
            .end_time
            .as_deref()
            .map(parse_date_filter)
            .transpose()?;
        validate_window(since, until)?;

        Ok(ReportConfig {
            usage_type: UsageType::new(self.usage_type.clone()),
            excluded: self.exclude.clone(),
            since,
            until,
            force_daily: self.daily,
            limit: limit_from_arg(self.limit),
            style: self.chart_style(),
        })
    }
}

/// Parse a date filter string into midnight of that day
///
/// Accepts `YY-MM-DD` and, as a fallback, `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use awsusage::cli::parse_date_filter;
///
/// let ts = parse_date_filter("20-01-15").unwrap();
/// assert_eq!(ts.to_string(), "2020-01-15 00:00:00");
///
/// let ts = parse_date_filter("2020-01-15").unwrap();
/// assert_eq!(ts.to_string(), "2020-01-15 00:00:00");
/// ```
pub fn parse_date_filter(date_str: &str) -> Result<NaiveDateTime> {
    let trimmed = date_str.trim();
    NaiveDate::parse_from_str(trimmed, "%y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| {
            AwsUsageError::InvalidDate(format!("'{date_str}' (expected YY-MM-DD or YYYY-MM-DD)"))
        })
}

/// Reject a window whose start is not before its end
pub fn validate_window(since: Option<NaiveDateTime>, until: Option<NaiveDateTime>) -> Result<()> {
    match (since, until) {
        (Some(since), Some(until)) if since >= until => Err(AwsUsageError::InvalidArgument(
            format!("start time {since} must be before end time {until}"),
        )),
        _ => Ok(()),
    }
}

/// Map the signed `--limit` value; zero or less means no limit
pub fn limit_from_arg(limit: i64) -> Option<usize> {
    usize::try_from(limit).ok().filter(|n| *n > 0)
}
