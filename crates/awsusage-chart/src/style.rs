//! Chart style selection

use serde::Serialize;
use std::fmt;

/// Kind of trace drawn per resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Bar,
}

/// Whether series are drawn on top of each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stacking {
    Stacked,
    Unstacked,
}

/// Chart kind and stacking, chosen once per run
///
/// # Examples
/// ```
/// use awsusage_chart::{ChartKind, ChartStyle, Stacking};
///
/// let style = ChartStyle::from_flags(true, false);
/// assert_eq!(style.kind, ChartKind::Bar);
/// assert_eq!(style.stacking, Stacking::Unstacked);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartStyle {
    pub kind: ChartKind,
    pub stacking: Stacking,
}

impl ChartStyle {
    /// Create a style
    pub fn new(kind: ChartKind, stacking: Stacking) -> Self {
        Self { kind, stacking }
    }

    /// Build a style from `--bar-chart` / `--stacked` switches
    pub fn from_flags(bar_chart: bool, stacked: bool) -> Self {
        let kind = if bar_chart {
            ChartKind::Bar
        } else {
            ChartKind::Line
        };
        let stacking = if stacked {
            Stacking::Stacked
        } else {
            Stacking::Unstacked
        };
        Self { kind, stacking }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::new(ChartKind::Line, Stacking::Unstacked)
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        };
        match self.stacking {
            Stacking::Stacked => write!(f, "stacked {kind}"),
            Stacking::Unstacked => write!(f, "{kind}"),
        }
    }
}
