//! Ranking and axis alignment
//!
//! Resources are ranked by their total over every observed bucket. The sort
//! is stable, so resources with equal totals keep the matrix key order.

use awsusage_core::aggregation_types::{RankedResource, RankedSeries, TimeAxis, UsageMatrix};
use awsusage_core::types::UsageValue;
use std::cmp::Ordering;

/// Rank resources by total usage, largest first
///
/// `limit` keeps only the first N resources; `None` or `Some(0)` keeps all.
///
/// # Examples
///
/// ```
/// use awsusage::ranking::rank;
/// use awsusage_core::aggregation_types::UsageMatrix;
/// use awsusage_core::types::{ResourceId, TimeBucket};
/// use chrono::NaiveDate;
///
/// let day = TimeBucket::from_date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
/// let mut matrix = UsageMatrix::<u64>::new();
/// matrix.add(ResourceId::new("small"), day, 1).unwrap();
/// matrix.add(ResourceId::new("big"), day, 100).unwrap();
///
/// let ranked = rank(&matrix, Some(1));
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].resource.as_str(), "big");
/// ```
pub fn rank<V: UsageValue>(
    matrix: &UsageMatrix<V>,
    limit: Option<usize>,
) -> Vec<RankedResource<V>> {
    let mut ranked: Vec<RankedResource<V>> = matrix
        .resources()
        .map(|resource| RankedResource {
            resource: resource.clone(),
            total: matrix.resource_total(resource),
        })
        .collect();

    ranked.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

    if let Some(n) = limit.filter(|n| *n > 0) {
        ranked.truncate(n);
    }
    ranked
}

/// Zero-fill ranked resources onto the axis
pub fn align<V: UsageValue>(
    matrix: &UsageMatrix<V>,
    ranked: &[RankedResource<V>],
    axis: &TimeAxis,
) -> Vec<RankedSeries<V>> {
    ranked
        .iter()
        .map(|entry| RankedSeries {
            resource: entry.resource.clone(),
            total: entry.total,
            values: axis
                .iter()
                .map(|bucket| matrix.value_or_zero(&entry.resource, bucket))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use awsusage_core::types::{Granularity, ResourceId, TimeBucket};
    use chrono::NaiveDate;

    fn day(d: u32) -> TimeBucket {
        TimeBucket::from_date(NaiveDate::from_ymd_opt(2020, 1, d).unwrap())
    }

    fn fixture() -> UsageMatrix<u64> {
        let mut matrix = UsageMatrix::new();
        matrix.add(ResourceId::new("a"), day(1), 5).unwrap();
        matrix.add(ResourceId::new("b"), day(1), 20).unwrap();
        matrix.add(ResourceId::new("c"), day(2), 5).unwrap();
        matrix.add(ResourceId::new("d"), day(3), 1).unwrap();
        matrix
    }

    fn names(ranked: &[RankedResource<u64>]) -> Vec<&str> {
        ranked.iter().map(|r| r.resource.as_str()).collect()
    }

    #[test]
    fn test_rank_descending_with_stable_ties() {
        let ranked = rank(&fixture(), None);
        assert_eq!(names(&ranked), vec!["b", "a", "c", "d"]);
        assert_eq!(ranked[0].total, 20);
    }

    #[test]
    fn test_limit() {
        assert_eq!(names(&rank(&fixture(), Some(2))), vec!["b", "a"]);
        assert_eq!(rank(&fixture(), Some(10)).len(), 4);
        assert_eq!(rank(&fixture(), Some(0)).len(), 4);
    }

    #[test]
    fn test_align_zero_fills_axis() {
        let matrix = fixture();
        let ranked = rank(&matrix, Some(3));
        let axis = TimeAxis {
            granularity: Granularity::Daily,
            buckets: vec![day(1), day(2)],
        };

        let series = align(&matrix, &ranked, &axis);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].values, vec![20, 0]);
        assert_eq!(series[1].values, vec![5, 0]);
        assert_eq!(series[2].values, vec![0, 5]);
        for s in &series {
            assert_eq!(s.values.len(), axis.len());
        }
    }

    #[test]
    fn test_total_counts_buckets_off_the_axis() {
        let matrix = fixture();
        let ranked = rank(&matrix, None);
        let axis = TimeAxis {
            granularity: Granularity::Daily,
            buckets: vec![day(2)],
        };

        let series = align(&matrix, &ranked, &axis);
        assert_eq!(series[0].total, 20);
        assert_eq!(series[0].displayed_total(), 0);
    }
}
