//! Aggregation module for building the usage matrix
//!
//! This module folds filtered report rows into a [`UsageMatrix`]: one entry
//! per resource, summed per time bucket. Rows keep their hourly start time as
//! bucket unless daily aggregation is forced, in which case every start time
//! is truncated to midnight of its calendar day.
//!
//! # Examples
//!
//! ```no_run
//! use awsusage::aggregation::Aggregator;
//! use awsusage::filters::UsageFilter;
//! use awsusage_core::provider::RecordSource;
//! use awsusage_core::types::UsageType;
//! use awsusage_report::ReportLoader;
//!
//! # async fn example() -> awsusage::Result<()> {
//! let loader = ReportLoader::new(vec!["report.csv".into()])?;
//! let rows = UsageFilter::new(UsageType::new("APS1-DataTransfer-Out-Bytes"))
//!     .filter_stream(loader.load_records());
//! let matrix = Aggregator::new().with_force_daily(true).aggregate::<u64, _>(rows).await?;
//! # Ok(())
//! # }
//! ```

use awsusage_core::aggregation_types::UsageMatrix;
use awsusage_core::error::Result;
use awsusage_core::types::{TimeBucket, TimedRecord, UsageRecord, UsageValue};
use chrono::NaiveDateTime;
use futures::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Builds a usage matrix from filtered rows
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    force_daily: bool,
    show_progress: bool,
}

impl Aggregator {
    /// Create an aggregator that keeps the reported start time as bucket
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate every bucket to midnight
    pub fn with_force_daily(mut self, force_daily: bool) -> Self {
        self.force_daily = force_daily;
        self
    }

    /// Enable or disable the progress spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Bucket a row's start time falls into
    pub fn bucket_for(&self, start: NaiveDateTime) -> TimeBucket {
        let bucket = TimeBucket::new(start);
        if self.force_daily {
            bucket.to_day()
        } else {
            bucket
        }
    }

    /// Sum filtered rows per resource and bucket
    ///
    /// # Errors
    ///
    /// Returns the first error in the stream, an error for a usage value
    /// that does not parse as `V`, or [`awsusage_core::AwsUsageError::UsageOverflow`] once
    /// the summed usage no longer fits `V`. No partial matrix is returned.
    pub async fn aggregate<V, S>(&self, records: S) -> Result<UsageMatrix<V>>
    where
        V: UsageValue,
        S: Stream<Item = Result<TimedRecord>>,
    {
        let progress = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} records processed")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Aggregating usage");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let mut matrix = UsageMatrix::new();
        let mut count = 0u64;

        tokio::pin!(records);
        while let Some(result) = records.next().await {
            let record = UsageRecord::<V>::from_timed(result?)?;
            let bucket = self.bucket_for(record.start);
            matrix.add(record.resource, bucket, record.value)?;

            count += 1;
            if let Some(ref pb) = progress {
                pb.set_position(count);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!(
                "Aggregated {} records for {} resources",
                count,
                matrix.len()
            ));
        }
        debug!(
            "Aggregated {} records for {} resources",
            count,
            matrix.len()
        );

        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awsusage_core::error::AwsUsageError;
    use awsusage_core::types::{RawRecord, ResourceId, columns, parse_start_time};
    use futures::stream;

    fn timed(resource: &str, start: &str, value: &str) -> Result<TimedRecord> {
        let record: RawRecord = [
            (columns::RESOURCE, resource),
            (columns::USAGE_TYPE, "X"),
            (columns::START_TIME, start),
            (columns::USAGE_VALUE, value),
        ]
        .into_iter()
        .collect();
        Ok(TimedRecord {
            start: parse_start_time(start).unwrap(),
            record,
        })
    }

    fn bucket(start: &str) -> TimeBucket {
        TimeBucket::new(parse_start_time(start).unwrap())
    }

    #[tokio::test]
    async fn test_sums_same_resource_and_bucket() {
        let rows = vec![
            timed("i-1", "01/01/20 00:00:00", "2"),
            timed("i-1", "01/01/20 00:00:00", "3"),
            timed("i-1", "01/01/20 01:00:00", "4"),
            timed("i-2", "01/01/20 00:00:00", "7"),
        ];

        let matrix: UsageMatrix<u64> = Aggregator::new()
            .aggregate(stream::iter(rows))
            .await
            .unwrap();

        let i1 = ResourceId::new("i-1");
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.get(&i1, &bucket("01/01/20 00:00:00")), Some(5));
        assert_eq!(matrix.get(&i1, &bucket("01/01/20 01:00:00")), Some(4));
        assert_eq!(matrix.resource_total(&ResourceId::new("i-2")), 7);
    }

    #[tokio::test]
    async fn test_force_daily_truncates_to_midnight() {
        let rows = vec![
            timed("i-1", "01/01/20 05:00:00", "1"),
            timed("i-1", "01/01/20 23:00:00", "2"),
            timed("i-1", "01/02/20 00:00:00", "4"),
        ];

        let matrix: UsageMatrix<u64> = Aggregator::new()
            .with_force_daily(true)
            .aggregate(stream::iter(rows))
            .await
            .unwrap();

        let i1 = ResourceId::new("i-1");
        assert_eq!(matrix.get(&i1, &bucket("01/01/20 00:00:00")), Some(3));
        assert_eq!(matrix.get(&i1, &bucket("01/02/20 00:00:00")), Some(4));
        assert_eq!(matrix.buckets().count(), 2);
    }

    #[tokio::test]
    async fn test_decimal_values() {
        let rows = vec![
            timed("i-1", "01/01/20 00:00:00", "0.5"),
            timed("i-1", "01/01/20 00:00:00", "1.25"),
        ];

        let matrix: UsageMatrix<f64> = Aggregator::new()
            .aggregate(stream::iter(rows))
            .await
            .unwrap();

        assert_eq!(matrix.grand_total(), 1.75);
    }

    #[tokio::test]
    async fn test_unparseable_value_aborts() {
        let rows = vec![
            timed("i-1", "01/01/20 00:00:00", "1"),
            timed("i-2", "01/01/20 00:00:00", "lots"),
        ];

        let err = Aggregator::new()
            .aggregate::<u64, _>(stream::iter(rows))
            .await
            .unwrap_err();

        match err {
            AwsUsageError::InvalidUsageValue { resource, value } => {
                assert_eq!(resource.as_str(), "i-2");
                assert_eq!(value, "lots");
            }
            other => panic!("Expected InvalidUsageValue, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stream_error_is_propagated() {
        let rows = vec![
            timed("i-1", "01/01/20 00:00:00", "1"),
            Err(AwsUsageError::InvalidArgument("broken source".into())),
        ];

        let result = Aggregator::new()
            .aggregate::<u64, _>(stream::iter(rows))
            .await;
        assert!(matches!(result, Err(AwsUsageError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_empty_stream_gives_empty_matrix() {
        let matrix: UsageMatrix<u64> = Aggregator::new()
            .aggregate(stream::iter(Vec::<Result<TimedRecord>>::new()))
            .await
            .unwrap();
        assert!(matrix.is_empty());
    }
}
