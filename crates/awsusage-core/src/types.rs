//! Core domain types for awsusage
//!
//! This module contains the fundamental types used throughout the awsusage crates.
//! These types provide strong typing for report concepts like resource identifiers,
//! usage types, time buckets, and usage values.

use crate::error::{AwsUsageError, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::ops::AddAssign;

/// Column names of an AWS usage report.
///
/// The report format prefixes every header after the first with a space,
/// and the literal names are kept for compatibility.
pub mod columns {
    /// Resource identifier column
    pub const RESOURCE: &str = " Resource";
    /// Usage type column
    pub const USAGE_TYPE: &str = " UsageType";
    /// Start time column, formatted as `MM/DD/YY HH:MM:SS`
    pub const START_TIME: &str = " StartTime";
    /// Usage value column
    pub const USAGE_VALUE: &str = " UsageValue";

    /// Columns every report must carry
    pub const REQUIRED: [&str; 4] = [RESOURCE, USAGE_TYPE, START_TIME, USAGE_VALUE];
}

/// `chrono` format of the start time column
pub const START_TIME_FORMAT: &str = "%m/%d/%y %H:%M:%S";

/// Strongly-typed AWS resource identifier
///
/// # Examples
/// ```
/// use awsusage_core::types::ResourceId;
///
/// let resource = ResourceId::new("i-0abc123");
/// assert_eq!(resource.as_str(), "i-0abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new ResourceId from any string-like type
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// AWS billing dimension, e.g. `APS1-DataTransfer-Out-Bytes`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UsageType(String);

impl UsageType {
    /// Create a new UsageType
    pub fn new(usage_type: impl Into<String>) -> Self {
        Self(usage_type.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A slot on the chart's time axis
///
/// Daily buckets sit at midnight; hourly buckets keep the full timestamp of
/// the report row. Ordering is chronological.
///
/// # Examples
/// ```
/// use awsusage_core::types::TimeBucket;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2020, 1, 1)
///     .unwrap()
///     .and_hms_opt(13, 0, 0)
///     .unwrap();
/// let bucket = TimeBucket::new(ts);
/// assert_eq!(bucket.hour(), 13);
/// assert_eq!(bucket.to_day().to_string(), "2020-01-01 00:00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimeBucket(NaiveDateTime);

impl TimeBucket {
    /// Create a new TimeBucket
    pub fn new(ts: NaiveDateTime) -> Self {
        Self(ts)
    }

    /// Midnight bucket of a calendar day
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN))
    }

    /// Get the inner timestamp
    pub fn inner(&self) -> &NaiveDateTime {
        &self.0
    }

    /// Hour of day
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Truncate to the calendar day's midnight
    pub fn to_day(&self) -> Self {
        Self::from_date(self.0.date())
    }

    /// Bucket one step later
    pub fn step(&self, granularity: Granularity) -> Self {
        Self(self.0 + granularity.delta())
    }

    /// Format using a chrono format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Spacing of the time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Granularity {
    Hourly,
    Daily,
}

impl Granularity {
    /// Distance between two consecutive buckets
    pub fn delta(&self) -> TimeDelta {
        match self {
            Granularity::Hourly => TimeDelta::hours(1),
            Granularity::Daily => TimeDelta::days(1),
        }
    }

    /// Format used for axis labels and the chart title
    pub fn label_format(&self) -> &'static str {
        match self {
            Granularity::Hourly => "%Y-%m-%d %H:%M",
            Granularity::Daily => "%Y-%m-%d",
        }
    }

    /// Title of the time axis
    pub fn axis_title(&self) -> &'static str {
        match self {
            Granularity::Hourly => "Hour",
            Granularity::Daily => "Day",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Hourly => write!(f, "hourly"),
            Granularity::Daily => write!(f, "daily"),
        }
    }
}

/// One report row as read from disk: column header to raw value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRecord(HashMap<String, String>);

impl RawRecord {
    /// Create a record from a header/value mapping
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    /// Raw value of a column, if present
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Raw value of a column, empty when absent
    pub fn field(&self, column: &str) -> &str {
        self.get(column).unwrap_or_default()
    }

    /// Resource column as a typed identifier
    pub fn resource(&self) -> ResourceId {
        ResourceId::new(self.field(columns::RESOURCE))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse a report start time (`MM/DD/YY HH:MM:SS`)
pub fn parse_start_time(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), START_TIME_FORMAT).map_err(|e| {
        AwsUsageError::InvalidTimestamp {
            value: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// A record that passed the filter, with its parsed start time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedRecord {
    /// Parsed start time column
    pub start: NaiveDateTime,
    /// The untouched row
    pub record: RawRecord,
}

/// Typed report row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRecord<V> {
    pub resource: ResourceId,
    pub start: NaiveDateTime,
    pub value: V,
}

impl<V: UsageValue> UsageRecord<V> {
    /// Parse the usage value of a filtered record
    pub fn from_timed(timed: TimedRecord) -> Result<Self> {
        let resource = timed.record.resource();
        let raw_value = timed.record.field(columns::USAGE_VALUE);
        let value =
            V::parse_value(raw_value).ok_or_else(|| AwsUsageError::InvalidUsageValue {
                resource: resource.clone(),
                value: raw_value.to_string(),
            })?;

        Ok(Self {
            resource,
            start: timed.start,
            value,
        })
    }
}

/// Numeric type a usage value is parsed into
///
/// Integer parsing (`u64`) is the default; `f64` accepts fractional values.
///
/// # Examples
/// ```
/// use awsusage_core::types::UsageValue;
///
/// assert_eq!(<u64 as UsageValue>::parse_value("42"), Some(42));
/// assert_eq!(<u64 as UsageValue>::parse_value("4.2"), None);
/// assert_eq!(<f64 as UsageValue>::parse_value(" 4.5"), Some(4.5));
/// ```
pub trait UsageValue:
    Copy + Default + PartialOrd + AddAssign + Serialize + fmt::Debug + Send + Sync + 'static
{
    /// Parse a raw column value
    fn parse_value(raw: &str) -> Option<Self>;

    /// Lossy conversion used for humanized display
    fn as_f64(self) -> f64;

    /// Add two values, `None` when the result is not representable
    fn checked_add(self, other: Self) -> Option<Self>;
}

impl UsageValue for u64 {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn checked_add(self, other: Self) -> Option<Self> {
        u64::checked_add(self, other)
    }
}

impl UsageValue for f64 {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn as_f64(self) -> f64 {
        self
    }

    fn checked_add(self, other: Self) -> Option<Self> {
        Some(self + other).filter(|v| v.is_finite())
    }
}
