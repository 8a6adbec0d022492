//! Basic usage example for the awsusage library
//!
//! Charts a few in-memory report rows, or the reports named on the command
//! line, as a stacked bar chart written to an HTML file.

use awsusage::{
    Result,
    pipeline::{ReportConfig, build_chart},
};
use awsusage_chart::{ChartKind, ChartStyle, RenderTarget, Stacking, render};
use awsusage_core::provider::RecordSource;
use awsusage_core::types::{RawRecord, UsageType, columns};
use awsusage_report::ReportLoader;
use std::path::PathBuf;

const USAGE_TYPE: &str = "APS1-DataTransfer-Out-Bytes";

fn sample_rows() -> Vec<RawRecord> {
    let rows = [
        ("i-0a1", "01/01/24 00:00:00", "1200000"),
        ("i-0a1", "01/02/24 00:00:00", "800000"),
        ("i-0b2", "01/01/24 00:00:00", "300000"),
        ("i-0b2", "01/03/24 00:00:00", "2500000"),
        ("nat-0c3", "01/02/24 00:00:00", "40000"),
    ];

    rows.into_iter()
        .map(|(resource, start, value)| {
            [
                (columns::RESOURCE, resource),
                (columns::USAGE_TYPE, USAGE_TYPE),
                (columns::START_TIME, start),
                (columns::USAGE_VALUE, value),
            ]
            .into_iter()
            .collect()
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut config = ReportConfig::new(UsageType::new(USAGE_TYPE));
    config.limit = Some(5);
    config.style = ChartStyle::new(ChartKind::Bar, Stacking::Stacked);

    // Report files from the command line, sample rows otherwise
    let reports: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    let source: Box<dyn RecordSource> = if reports.is_empty() {
        Box::new(sample_rows())
    } else {
        Box::new(ReportLoader::new(reports)?)
    };

    let chart = build_chart::<u64, _>(&*source, &config, false).await?;

    println!("{}", chart.title);
    for series in &chart.series {
        println!("  {}", series.title);
    }

    let out = std::env::temp_dir().join("awsusage-basic.html");
    render(&chart, &RenderTarget::Html(out.clone()))?;
    println!("\nChart written to {}", out.display());

    Ok(())
}
