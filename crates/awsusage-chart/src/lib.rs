//! Chart construction and rendering for awsusage
//!
//! This crate turns ranked, axis-aligned usage series into a chart
//! description and hands it to plotly for display.

pub mod render;
pub mod spec;
pub mod style;

pub use render::{RenderTarget, render};
pub use spec::{ChartSpec, DataPoint, SeriesSpec};
pub use style::{ChartKind, ChartStyle, Stacking};
