//! Chart description
//!
//! A [`ChartSpec`] holds everything the renderer needs: titles, axis labels
//! and one fully zero-filled series per ranked resource. It is derived from
//! the usage matrix, the ranked series and the time axis, and owns no state
//! of its own.

use crate::style::ChartStyle;
use awsusage_core::aggregation_types::{RankedSeries, TimeAxis, UsageMatrix};
use awsusage_core::humanize::humanize;
use awsusage_core::types::{TimeBucket, UsageType, UsageValue};
use serde::Serialize;

/// One value on a series, with its hover label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint<V> {
    pub value: V,
    pub label: String,
}

/// One chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec<V> {
    /// Legend entry: resource and humanized total of the plotted values
    pub title: String,
    /// One point per axis bucket
    pub points: Vec<DataPoint<V>>,
}

impl<V: UsageValue> SeriesSpec<V> {
    /// Plotted values in axis order
    pub fn values(&self) -> Vec<V> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Hover labels in axis order
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }
}

/// Render-ready chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec<V> {
    pub style: ChartStyle,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x_labels: Vec<String>,
    pub series: Vec<SeriesSpec<V>>,
}

impl<V: UsageValue> ChartSpec<V> {
    /// Assemble the chart for a usage type
    ///
    /// The chart title carries the grand total of the whole matrix, so
    /// resources cut by the limit still count towards it.
    pub fn build(
        usage_type: &UsageType,
        style: ChartStyle,
        matrix: &UsageMatrix<V>,
        ranked: &[RankedSeries<V>],
        axis: &TimeAxis,
    ) -> Self {
        let fmt = axis.granularity.label_format();
        let bound = |bucket: Option<&TimeBucket>| bucket.map(|b| b.format(fmt)).unwrap_or_default();
        let title = format!(
            "{} from {} to {} [total: {}]",
            usage_type,
            bound(axis.first()),
            bound(axis.last()),
            humanize(matrix.grand_total().as_f64())
        );

        let series = ranked
            .iter()
            .map(|ranked| {
                let points = axis
                    .iter()
                    .zip(&ranked.values)
                    .map(|(bucket, value)| DataPoint {
                        value: *value,
                        label: format!("{} {}", ranked.resource, bucket),
                    })
                    .collect();
                SeriesSpec {
                    title: format!(
                        "{} [{}]",
                        ranked.resource,
                        humanize(ranked.displayed_total().as_f64())
                    ),
                    points,
                }
            })
            .collect();

        Self {
            style,
            title,
            x_title: axis.granularity.axis_title().to_string(),
            y_title: usage_type.to_string(),
            x_labels: axis.labels(),
            series,
        }
    }
}
