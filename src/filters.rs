//! Filtering module for report rows
//!
//! A row survives when its usage type matches, its resource is not excluded
//! and its start time falls inside the half-open window `[since, until)`.
//! Usage type and exclusion are checked before the start time is parsed, so
//! rows of other usage types never fail on a malformed timestamp.
//!
//! # Examples
//!
//! ```
//! use awsusage::filters::UsageFilter;
//! use awsusage_core::types::UsageType;
//! use chrono::NaiveDate;
//!
//! let filter = UsageFilter::new(UsageType::new("APS1-DataTransfer-Out-Bytes"))
//!     .with_excluded(["i-0abc123"])
//!     .with_since(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
//! ```

use awsusage_core::error::Result;
use awsusage_core::types::{
    RawRecord, ResourceId, TimedRecord, UsageType, columns, parse_start_time,
};
use chrono::NaiveDateTime;
use futures::{Stream, StreamExt, future};
use std::collections::HashSet;

/// Filter configuration for report rows
#[derive(Debug, Clone)]
pub struct UsageFilter {
    /// Usage type rows must match exactly
    pub usage_type: UsageType,
    /// Resources dropped regardless of usage
    pub excluded: HashSet<ResourceId>,
    /// Start of the window (inclusive)
    pub since: Option<NaiveDateTime>,
    /// End of the window (exclusive)
    pub until: Option<NaiveDateTime>,
}

impl UsageFilter {
    /// Create a filter for one usage type with no window and no exclusions
    pub fn new(usage_type: UsageType) -> Self {
        Self {
            usage_type,
            excluded: HashSet::new(),
            since: None,
            until: None,
        }
    }

    /// Add resources to exclude
    pub fn with_excluded<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded
            .extend(resources.into_iter().map(ResourceId::new));
        self
    }

    /// Set the start of the window
    pub fn with_since(mut self, since: NaiveDateTime) -> Self {
        self.since = Some(since);
        self
    }

    /// Set the end of the window
    pub fn with_until(mut self, until: NaiveDateTime) -> Self {
        self.until = Some(until);
        self
    }

    /// Whether a row is of the selected usage type and not excluded
    pub fn matches(&self, record: &RawRecord) -> bool {
        record.field(columns::USAGE_TYPE) == self.usage_type.as_str()
            && !self.excluded.contains(record.field(columns::RESOURCE))
    }

    /// Whether a start time falls inside the window
    pub fn in_window(&self, start: &NaiveDateTime) -> bool {
        if self.since.is_some_and(|since| *start < since) {
            return false;
        }
        if self.until.is_some_and(|until| *start >= until) {
            return false;
        }
        true
    }

    /// Select a row, attaching its parsed start time
    ///
    /// Returns `Ok(None)` for rows the filter drops.
    ///
    /// # Errors
    ///
    /// Returns an error if a matching row has an unparseable start time
    pub fn select(&self, record: RawRecord) -> Result<Option<TimedRecord>> {
        if !self.matches(&record) {
            return Ok(None);
        }

        let start = parse_start_time(record.field(columns::START_TIME))?;
        if !self.in_window(&start) {
            return Ok(None);
        }

        Ok(Some(TimedRecord { start, record }))
    }

    /// Filter a stream of rows
    ///
    /// Errors from the source and timestamp errors are passed through; the
    /// consumer decides to abort on them.
    pub fn filter_stream<S>(self, stream: S) -> impl Stream<Item = Result<TimedRecord>>
    where
        S: Stream<Item = Result<RawRecord>>,
    {
        stream.filter_map(move |result| {
            future::ready(result.and_then(|record| self.select(record)).transpose())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awsusage_core::error::AwsUsageError;
    use chrono::{NaiveDate, TimeDelta};

    fn row(resource: &str, usage_type: &str, start: &str) -> RawRecord {
        [
            (columns::RESOURCE, resource),
            (columns::USAGE_TYPE, usage_type),
            (columns::START_TIME, start),
            (columns::USAGE_VALUE, "1"),
        ]
        .into_iter()
        .collect()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_usage_type_must_match_exactly() {
        let filter = UsageFilter::new(UsageType::new("X"));
        assert!(filter.matches(&row("i-1", "X", "01/01/20 00:00:00")));
        assert!(!filter.matches(&row("i-1", "Y", "01/01/20 00:00:00")));
        assert!(!filter.matches(&row("i-1", " X", "01/01/20 00:00:00")));
    }

    #[test]
    fn test_excluded_resources_are_dropped() {
        let filter = UsageFilter::new(UsageType::new("X")).with_excluded(["i-2", "i-3"]);
        assert!(filter.matches(&row("i-1", "X", "01/01/20 00:00:00")));
        assert!(!filter.matches(&row("i-2", "X", "01/01/20 00:00:00")));
        assert!(!filter.matches(&row("i-3", "X", "01/01/20 00:00:00")));
    }

    #[test]
    fn test_window_is_half_open() {
        let filter = UsageFilter::new(UsageType::new("X"))
            .with_since(midnight(2020, 1, 2))
            .with_until(midnight(2020, 1, 3));

        assert!(!filter.in_window(&midnight(2020, 1, 1)));
        assert!(filter.in_window(&midnight(2020, 1, 2)));
        assert!(filter.in_window(&(midnight(2020, 1, 2) + TimeDelta::hours(23))));
        assert!(!filter.in_window(&midnight(2020, 1, 3)));
    }

    #[test]
    fn test_select_attaches_start_time() {
        let filter = UsageFilter::new(UsageType::new("X"));
        let selected = filter
            .select(row("i-1", "X", "01/02/20 05:00:00"))
            .unwrap()
            .unwrap();
        assert_eq!(selected.start, midnight(2020, 1, 2) + TimeDelta::hours(5));
        assert_eq!(selected.record.field(columns::RESOURCE), "i-1");
    }

    #[test]
    fn test_bad_timestamp_only_fails_matching_rows() {
        let filter = UsageFilter::new(UsageType::new("X"));
        assert!(filter.select(row("i-1", "Y", "garbage")).unwrap().is_none());
        assert!(matches!(
            filter.select(row("i-1", "X", "garbage")),
            Err(AwsUsageError::InvalidTimestamp { .. })
        ));
    }

    #[tokio::test]
    async fn test_filter_stream() {
        let rows = vec![
            Ok(row("i-1", "X", "01/01/20 00:00:00")),
            Ok(row("i-2", "Y", "01/01/20 00:00:00")),
            Ok(row("i-3", "X", "01/05/20 00:00:00")),
            Ok(row("i-4", "X", "01/02/20 12:00:00")),
        ];
        let filter = UsageFilter::new(UsageType::new("X")).with_until(midnight(2020, 1, 3));

        let kept: Vec<String> = filter
            .filter_stream(futures::stream::iter(rows))
            .map(|r| r.unwrap().record.field(columns::RESOURCE).to_string())
            .collect()
            .await;

        assert_eq!(kept, vec!["i-1", "i-4"]);
    }
}
