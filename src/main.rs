//! awsusage - Chart AWS usage reports by resource over time

use awsusage::{
    AwsUsageError, Result,
    cli::Cli,
    pipeline::{ReportConfig, build_chart},
};
use awsusage_chart::{RenderTarget, render};
use awsusage_core::types::UsageValue;
use awsusage_report::ReportLoader;
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn chart<V: UsageValue>(
    loader: &ReportLoader,
    config: &ReportConfig,
    target: &RenderTarget,
    show_progress: bool,
) -> Result<()> {
    let spec = build_chart::<V, _>(loader, config, show_progress).await?;
    render(&spec, target)
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.report_config()?;
    let target = cli.render_target();
    let loader = ReportLoader::new(cli.reports.clone())?;

    info!(
        "Charting {} from {} report file(s)",
        config.usage_type,
        loader.paths().len()
    );

    let show_progress =
        target == RenderTarget::Browser && is_terminal::is_terminal(std::io::stdout());

    if cli.decimal {
        chart::<f64>(&loader, &config, &target, show_progress).await
    } else {
        chart::<u64>(&loader, &config, &target, show_progress).await
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // --verbose overrides RUST_LOG
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("awsusage=info,awsusage_report=info,awsusage_chart=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("awsusage=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => {}
        Err(AwsUsageError::NoData) => {
            println!("{}", AwsUsageError::NoData);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(1);
        }
    }
}
