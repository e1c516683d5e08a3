//! SectorLens CLI: scrape the top index constituents and export the results.
//!
//! Writes `combined_data.xlsx`, `buy_ratings.xlsx`, and one closing-price
//! chart per industry. Every setting has a default; `--config` points at a
//! TOML file overriding any subset of them.

use anyhow::{Context, Result};
use clap::Parser;
use sectorlens_core::source::{HttpFetcher, PageTextClassifier, StdoutProgress};
use sectorlens_runner::{
    Pipeline, PipelineConfig, PipelineError, PlottersRenderer, COMPLETION_MESSAGE,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "sectorlens",
    about = "SectorLens: index constituent profiles, analyst sentiment, and industry charts"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the workbooks and the plot directory. Overrides the config.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output.root = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = load_config(&cli)?;
    info!(root = %config.output.root.display(), top_n = config.source.top_n, "configuration loaded");
    let fetcher = HttpFetcher::new(
        &config.source.user_agent,
        Duration::from_secs(config.source.request_timeout_secs),
    )?;
    let renderer = PlottersRenderer::default();

    println!("Scraping the top {} index constituents...", config.source.top_n);
    let pipeline = Pipeline::new(
        &config,
        &fetcher,
        &PageTextClassifier,
        &renderer,
        &StdoutProgress,
    );

    match pipeline.run() {
        Ok(report) => {
            if !report.diagnostics.is_empty() {
                println!("\n{} diagnostics:", report.diagnostics.len());
                for d in &report.diagnostics {
                    println!("  - {d}");
                }
            }
            println!("\n{}", report.summary());
            if let Some(path) = &report.outputs.combined {
                println!("Combined data saved to: {}", path.display());
            }
            if let Some(path) = &report.outputs.buy_ratings {
                println!("Buy ratings saved to: {}", path.display());
            }
            println!("{COMPLETION_MESSAGE}");
            Ok(())
        }
        Err(err @ (PipelineError::IndexUnavailable(_) | PipelineError::NoConstituents)) => {
            eprintln!("Error: {err}");
            eprintln!("Failed to retrieve or process index data.");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
