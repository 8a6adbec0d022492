//! Aggregation data types for awsusage
//!
//! Pure data structures produced by the aggregation pipeline.
//! These types have no dependencies on the report loader or the chart renderer.

use crate::error::{AwsUsageError, Result};
use crate::types::{Granularity, ResourceId, TimeBucket, UsageValue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Accumulated usage per resource and time bucket
///
/// Sparse: a bucket is present only if at least one record landed in it.
/// Absent buckets read as zero. Keys are sorted, so two matrices built from
/// the same records compare equal whatever order the records arrived in.
///
/// Every addition is checked against the running grand total, so any sum
/// taken over the matrix afterwards is representable.
///
/// # Examples
/// ```
/// use awsusage_core::aggregation_types::UsageMatrix;
/// use awsusage_core::types::{ResourceId, TimeBucket};
/// use chrono::NaiveDate;
///
/// let day = TimeBucket::from_date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
/// let mut matrix = UsageMatrix::<u64>::new();
/// matrix.add(ResourceId::new("i-1"), day, 5).unwrap();
/// matrix.add(ResourceId::new("i-1"), day, 7).unwrap();
///
/// assert_eq!(matrix.get(&ResourceId::new("i-1"), &day), Some(12));
/// assert_eq!(matrix.value_or_zero(&ResourceId::new("i-2"), &day), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageMatrix<V> {
    resources: BTreeMap<ResourceId, BTreeMap<TimeBucket, V>>,
    #[serde(skip)]
    total: V,
}

impl<V: UsageValue> UsageMatrix<V> {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self {
            resources: BTreeMap::new(),
            total: V::default(),
        }
    }

    /// Add a value to a (resource, bucket) cell, starting from zero
    ///
    /// # Errors
    ///
    /// Returns [`AwsUsageError::UsageOverflow`] if the matrix total would
    /// no longer be representable; the matrix is left unchanged.
    pub fn add(&mut self, resource: ResourceId, bucket: TimeBucket, value: V) -> Result<()> {
        let Some(total) = self.total.checked_add(value) else {
            return Err(AwsUsageError::UsageOverflow { resource });
        };

        // A cell never exceeds the grand total
        *self
            .resources
            .entry(resource)
            .or_default()
            .entry(bucket)
            .or_default() += value;
        self.total = total;
        Ok(())
    }

    /// Whether no usage was recorded at all
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of distinct resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Observed value of a cell
    pub fn get(&self, resource: &ResourceId, bucket: &TimeBucket) -> Option<V> {
        self.resources
            .get(resource)
            .and_then(|usage| usage.get(bucket))
            .copied()
    }

    /// Observed value of a cell, zero when absent
    pub fn value_or_zero(&self, resource: &ResourceId, bucket: &TimeBucket) -> V {
        self.get(resource, bucket).unwrap_or_default()
    }

    /// Observed buckets of one resource
    pub fn usage(&self, resource: &ResourceId) -> Option<&BTreeMap<TimeBucket, V>> {
        self.resources.get(resource)
    }

    /// Resources in key order
    pub fn resources(&self) -> impl Iterator<Item = &ResourceId> {
        self.resources.keys()
    }

    /// Every observed bucket, per resource, with repeats across resources
    pub fn buckets(&self) -> impl Iterator<Item = TimeBucket> + '_ {
        self.resources.values().flat_map(|usage| usage.keys().copied())
    }

    /// Sum of every bucket of one resource
    pub fn resource_total(&self, resource: &ResourceId) -> V {
        self.usage(resource)
            .map(|usage| sum(usage.values().copied()))
            .unwrap_or_default()
    }

    /// Sum over the whole matrix
    pub fn grand_total(&self) -> V {
        self.total
    }
}

/// Sum of matrix values; bounded by the checked grand total
fn sum<V: UsageValue>(values: impl IntoIterator<Item = V>) -> V {
    values.into_iter().fold(V::default(), |mut acc, v| {
        acc += v;
        acc
    })
}

/// A resource and its total usage, kept beside the matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResource<V> {
    pub resource: ResourceId,
    pub total: V,
}

/// A ranked resource with one value per time-axis bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSeries<V> {
    /// Resource the series belongs to
    pub resource: ResourceId,
    /// Total over every observed bucket, used for ranking
    pub total: V,
    /// Values aligned to the axis, zero where nothing was observed
    pub values: Vec<V>,
}

impl<V: UsageValue> RankedSeries<V> {
    /// Sum of the values that fall on the axis
    pub fn displayed_total(&self) -> V {
        sum(self.values.iter().copied())
    }
}

/// Ordered, evenly spaced buckets the chart is drawn over
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeAxis {
    pub granularity: Granularity,
    pub buckets: Vec<TimeBucket>,
}

impl TimeAxis {
    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the axis has no buckets
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// First bucket
    pub fn first(&self) -> Option<&TimeBucket> {
        self.buckets.first()
    }

    /// Last bucket
    pub fn last(&self) -> Option<&TimeBucket> {
        self.buckets.last()
    }

    /// Buckets in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &TimeBucket> {
        self.buckets.iter()
    }

    /// Axis labels in the granularity's format
    pub fn labels(&self) -> Vec<String> {
        let fmt = self.granularity.label_format();
        self.buckets.iter().map(|bucket| bucket.format(fmt)).collect()
    }
}
