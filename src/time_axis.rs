//! Time axis construction
//!
//! The axis is the ordered, evenly spaced list of buckets every chart series
//! is aligned to. Bounds default to the earliest and latest observed bucket;
//! the end bound is exclusive.

use awsusage_core::aggregation_types::{TimeAxis, UsageMatrix};
use awsusage_core::error::{AwsUsageError, Result};
use awsusage_core::types::{Granularity, TimeBucket, UsageValue};
use chrono::NaiveDateTime;
use tracing::debug;

/// Builder for a [`TimeAxis`]
///
/// # Examples
///
/// ```
/// use awsusage::time_axis::TimeAxisBuilder;
/// use awsusage_core::aggregation_types::UsageMatrix;
/// use awsusage_core::types::{Granularity, ResourceId, TimeBucket};
/// use chrono::NaiveDate;
///
/// let day = |d| TimeBucket::from_date(NaiveDate::from_ymd_opt(2020, 1, d).unwrap());
/// let mut matrix = UsageMatrix::<u64>::new();
/// matrix.add(ResourceId::new("i-1"), day(1), 5).unwrap();
/// matrix.add(ResourceId::new("i-1"), day(4), 5).unwrap();
///
/// let axis = TimeAxisBuilder::new().build(&matrix).unwrap();
/// assert_eq!(axis.granularity, Granularity::Daily);
/// assert_eq!(axis.buckets, vec![day(1), day(2), day(3)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeAxisBuilder {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    force_daily: bool,
}

impl TimeAxisBuilder {
    /// Builder deriving both bounds from the data
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the first bucket
    pub fn with_start(mut self, start: Option<NaiveDateTime>) -> Self {
        self.start = start;
        self
    }

    /// Override the exclusive end of the axis
    pub fn with_end(mut self, end: Option<NaiveDateTime>) -> Self {
        self.end = end;
        self
    }

    /// Always use daily spacing
    pub fn with_force_daily(mut self, force_daily: bool) -> Self {
        self.force_daily = force_daily;
        self
    }

    /// Spacing implied by the observed buckets
    pub fn granularity<V: UsageValue>(&self, matrix: &UsageMatrix<V>) -> Granularity {
        if !self.force_daily && matrix.buckets().any(|bucket| bucket.hour() != 0) {
            Granularity::Hourly
        } else {
            Granularity::Daily
        }
    }

    /// Build the axis for a matrix
    ///
    /// # Errors
    ///
    /// Returns [`AwsUsageError::NoData`] if the matrix is empty
    pub fn build<V: UsageValue>(&self, matrix: &UsageMatrix<V>) -> Result<TimeAxis> {
        let (Some(min), Some(max)) = (matrix.buckets().min(), matrix.buckets().max()) else {
            return Err(AwsUsageError::NoData);
        };

        let granularity = self.granularity(matrix);
        let mut start = self.start.map(TimeBucket::new).unwrap_or(min);
        let end = self.end.map(TimeBucket::new).unwrap_or(max);
        if granularity == Granularity::Daily {
            start = start.to_day();
        }

        let mut buckets = Vec::new();
        let mut current = start;
        while current < end {
            buckets.push(current);
            current = current.step(granularity);
        }
        // A single observed bucket still gets a point
        if buckets.is_empty() && start == end {
            buckets.push(start);
        }

        debug!(
            "Built {} axis of {} buckets from {} to {}",
            granularity,
            buckets.len(),
            start,
            end
        );

        Ok(TimeAxis {
            granularity,
            buckets,
        })
    }
}
