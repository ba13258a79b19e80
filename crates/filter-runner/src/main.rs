//! Sensor Filter - Main Entry Point

use anyhow::Context;
use clap::Parser;
use filter_runner::{init_logging, load_settings, run_stream};
use std::io;
use tracing::info;

mod cli;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    info!("=== Sensor Filter v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = load_settings(cli.config.as_deref())?;
    let mut estimator = settings
        .filter
        .build()
        .context("invalid filter configuration")?;

    let count = run_stream(&mut estimator, io::stdin().lock(), io::stdout().lock())?;
    info!("Processed {} samples with {}", count, estimator.name());

    Ok(())
}
