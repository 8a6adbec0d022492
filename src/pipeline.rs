//! End-to-end report pipeline
//!
//! Wires the stages together: rows from a [`RecordSource`] are filtered,
//! aggregated into a matrix, ranked and aligned onto a time axis, and turned
//! into a render-ready [`ChartSpec`]. The stream is consumed exactly once.

use crate::aggregation::Aggregator;
use crate::filters::UsageFilter;
use crate::ranking::{align, rank};
use crate::time_axis::TimeAxisBuilder;
use awsusage_chart::{ChartSpec, ChartStyle};
use awsusage_core::error::Result;
use awsusage_core::provider::RecordSource;
use awsusage_core::types::{UsageType, UsageValue};
use chrono::NaiveDateTime;
use tracing::info;

/// Everything one report run needs besides its input
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Usage type to chart
    pub usage_type: UsageType,
    /// Resources left out before aggregation
    pub excluded: Vec<String>,
    /// First instant to include
    pub since: Option<NaiveDateTime>,
    /// Instant to stop before
    pub until: Option<NaiveDateTime>,
    /// Use daily buckets even for hourly reports
    pub force_daily: bool,
    /// Number of resources to chart; `None` charts every resource
    pub limit: Option<usize>,
    /// Chart kind and stacking
    pub style: ChartStyle,
}

impl ReportConfig {
    /// Configuration charting every resource of a usage type
    pub fn new(usage_type: UsageType) -> Self {
        Self {
            usage_type,
            excluded: Vec::new(),
            since: None,
            until: None,
            force_daily: false,
            limit: None,
            style: ChartStyle::default(),
        }
    }

    /// Row filter for this configuration
    pub fn filter(&self) -> UsageFilter {
        let mut filter = UsageFilter::new(self.usage_type.clone())
            .with_excluded(self.excluded.iter().cloned());
        if let Some(since) = self.since {
            filter = filter.with_since(since);
        }
        if let Some(until) = self.until {
            filter = filter.with_until(until);
        }
        filter
    }

    /// Time axis builder for this configuration
    pub fn time_axis(&self) -> TimeAxisBuilder {
        TimeAxisBuilder::new()
            .with_start(self.since)
            .with_end(self.until)
            .with_force_daily(self.force_daily)
    }
}

/// Run the pipeline up to a render-ready chart
///
/// # Errors
///
/// Returns [`awsusage_core::AwsUsageError::NoData`] when nothing survives
/// filtering, or the first read, format or parse error met on the way.
pub async fn build_chart<V, S>(
    source: &S,
    config: &ReportConfig,
    show_progress: bool,
) -> Result<ChartSpec<V>>
where
    V: UsageValue,
    S: RecordSource + ?Sized,
{
    let records = config.filter().filter_stream(source.load_records());
    let matrix = Aggregator::new()
        .with_force_daily(config.force_daily)
        .with_progress(show_progress)
        .aggregate::<V, _>(records)
        .await?;

    let axis = config.time_axis().build(&matrix)?;
    let ranked = rank(&matrix, config.limit);
    let series = align(&matrix, &ranked, &axis);

    info!(
        "Charting {} of {} resources over {} {} buckets",
        series.len(),
        matrix.len(),
        axis.len(),
        axis.granularity
    );

    Ok(ChartSpec::build(
        &config.usage_type,
        config.style,
        &matrix,
        &series,
        &axis,
    ))
}
