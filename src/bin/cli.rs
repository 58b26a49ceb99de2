//! sitewatch CLI
//!
//! Runs the monitor once against a project folder.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use sitewatch::{
    error::Result,
    models::{Config, ProjectPaths},
    pipeline::{self, SnapshotState},
    services::HttpFetcher,
};

/// sitewatch - Website keyword and link monitor
#[derive(Parser, Debug)]
#[command(
    name = "sitewatch",
    version,
    about = "Reports new keyword occurrences and new links on monitored pages"
)]
struct Cli {
    /// Project folder containing inputFolder/ and cacheFolder/
    project_dir: PathBuf,
}

/// Initialize logging. `RUST_LOG` overrides the default level.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let paths = ProjectPaths::new(&cli.project_dir);
    let config = Config::load_or_default(&paths.config_file);
    config.validate()?;

    log::info!("Monitoring project {}", paths.root.display());

    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let mut stdout = io::stdout().lock();
    let summary = pipeline::run_monitor(&config, &paths, &fetcher, &mut stdout)?;

    if summary.state == SnapshotState::ValidSnapshot {
        log::info!(
            "{} change(s) found across {} url(s)",
            summary.findings.len(),
            summary.url_total
        );
    }
    if summary.fetch_failures > 0 {
        log::warn!(
            "{} of {} url(s) could not be fetched",
            summary.fetch_failures,
            summary.url_total
        );
    }

    Ok(())
}
