//! drivebc-kml
//!
//! Fetches the DriveBC feeds once, writes the KML file and prints a summary.
//! Exits 0 on success and 1 on any fatal error; the previous output file is
//! left untouched on failure.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use application::{ExportService, ExportSummary};
use clap::Parser;
use infrastructure::{AppConfig, AtomicFileSink, DriveBcFeedAdapter, init_logging};
use tracing::error;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) => {
            print!("{summary}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExportSummary> {
    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(output) = &cli.output {
        config.output.path.clone_from(output);
    }

    init_logging(&config.logging, cli.verbose)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(export(&config))
}

async fn export(config: &AppConfig) -> anyhow::Result<ExportSummary> {
    let feeds = DriveBcFeedAdapter::from_config(&config.drivebc, &config.retry)?;
    let sink = AtomicFileSink::new(&config.output.path);

    let service = ExportService::new(Arc::new(feeds), Arc::new(sink))
        .with_config(config.output.export_config());

    let summary = service.run().await.inspect_err(|e| {
        error!(kind = e.kind(), error = %e, "Export failed");
    })?;
    Ok(summary)
}
