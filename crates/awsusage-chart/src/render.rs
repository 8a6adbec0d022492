//! Plotly rendering
//!
//! The chart style is resolved to a trace strategy in [`trace_for`]; the
//! rest of the rendering code does not branch on kind or stacking.

use crate::spec::{ChartSpec, SeriesSpec};
use crate::style::{ChartKind, ChartStyle, Stacking};
use awsusage_core::error::Result;
use awsusage_core::types::UsageValue;
use plotly::common::{Fill, Mode, Orientation, Title};
use plotly::layout::{Axis, BarMode, Legend};
use plotly::{Bar, Layout, Plot, Scatter, Trace};
use std::path::PathBuf;
use tracing::info;

/// Stack group shared by every line of a stacked line chart
const STACK_GROUP: &str = "usage";

/// Where the rendered chart goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Open the chart in the default browser
    Browser,
    /// Write a standalone HTML page
    Html(PathBuf),
}

fn trace_for<V: UsageValue>(
    style: ChartStyle,
    x_labels: &[String],
    series: &SeriesSpec<V>,
) -> Box<dyn Trace> {
    let x = x_labels.to_vec();
    let y = series.values();
    let text = series.labels();

    match (style.kind, style.stacking) {
        (ChartKind::Line, Stacking::Unstacked) => Scatter::new(x, y)
            .name(series.title.as_str())
            .mode(Mode::LinesMarkers)
            .text_array(text),
        (ChartKind::Line, Stacking::Stacked) => Scatter::new(x, y)
            .name(series.title.as_str())
            .mode(Mode::LinesMarkers)
            .stack_group(STACK_GROUP)
            .fill(Fill::ToNextY)
            .text_array(text),
        // Bars show their label on hover only
        (ChartKind::Bar, _) => Bar::new(x, y)
            .name(series.title.as_str())
            .hover_text_array(text),
    }
}

fn layout_for<V: UsageValue>(spec: &ChartSpec<V>) -> Layout {
    let layout = Layout::new()
        .title(Title::with_text(spec.title.as_str()))
        .x_axis(Axis::new().title(Title::with_text(spec.x_title.as_str())))
        .y_axis(Axis::new().title(Title::with_text(spec.y_title.as_str())))
        .legend(Legend::new().orientation(Orientation::Horizontal));

    match (spec.style.kind, spec.style.stacking) {
        (ChartKind::Bar, Stacking::Stacked) => layout.bar_mode(BarMode::Stack),
        (ChartKind::Bar, Stacking::Unstacked) => layout.bar_mode(BarMode::Group),
        (ChartKind::Line, _) => layout,
    }
}

impl<V: UsageValue> ChartSpec<V> {
    /// Build the plotly figure
    pub fn to_plot(&self) -> Plot {
        let mut plot = Plot::new();
        plot.set_layout(layout_for(self));
        for series in &self.series {
            plot.add_trace(trace_for(self.style, &self.x_labels, series));
        }
        plot
    }
}

/// Display a chart
///
/// # Errors
///
/// Returns an error if the HTML file cannot be written
pub fn render<V: UsageValue>(spec: &ChartSpec<V>, target: &RenderTarget) -> Result<()> {
    let plot = spec.to_plot();

    match target {
        RenderTarget::Browser => {
            info!("Opening {} chart in browser", spec.style);
            plot.show();
        }
        RenderTarget::Html(path) => {
            info!("Writing {} chart to {}", spec.style, path.display());
            std::fs::write(path, plot.to_html())?;
        }
    }

    Ok(())
}
