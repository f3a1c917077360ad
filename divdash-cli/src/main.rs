//! divdash: fetch dividend data from Yahoo Finance and write the dashboard
//! JSON views.
//!
//! With no arguments the built-in universe is processed and the five views
//! are written to the current directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use divdash_core::data::YahooProvider;
use divdash_runner::{run_job, PipelineConfig, StdoutProgress, View};

#[derive(Parser)]
#[command(
    name = "divdash",
    about = "Fetch dividend stock data and write dashboard JSON"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to the built-in job.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the JSON views are written to. Overrides the config.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default().validated()?,
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let provider = YahooProvider::connect(&config.base_url, &config.session_url)
        .with_context(|| format!("connecting to {}", config.base_url))?;
    let progress = StdoutProgress::new(config.progress_every);

    let report = run_job(&provider, &config, &progress);

    println!(
        "\nDone! {} stocks processed, {} JSON files generated.",
        report.summary.collected(),
        report.emit.written.len()
    );

    if !report.succeeded() {
        for (view, err) in &report.emit.failed {
            error!("{} view not written: {err}", view.name());
        }
        eprintln!(
            "{} of {} views failed",
            report.emit.failed.len(),
            View::ALL.len()
        );
        std::process::exit(1);
    }

    Ok(())
}
