// src/pipeline/monitor.rs

//! One monitoring run.
//!
//! With a valid snapshot on disk, pages are diffed against it and the
//! report is written out. Either way the snapshot is then rebuilt from
//! fresh fetches and replaces the old one.

use std::io::Write;

use crate::error::Result;
use crate::models::{Config, Finding, ProjectPaths};
use crate::pipeline::build::SnapshotBuilder;
use crate::pipeline::diff::DiffEngine;
use crate::pipeline::report::render_report;
use crate::services::PageFetcher;
use crate::storage::SnapshotStore;

/// Whether a previous snapshot can be diffed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotState {
    NoValidSnapshot,
    ValidSnapshot,
}

impl SnapshotState {
    pub fn of(store: &SnapshotStore) -> Self {
        if store.is_valid() {
            SnapshotState::ValidSnapshot
        } else {
            SnapshotState::NoValidSnapshot
        }
    }
}

/// What a run did.
#[derive(Debug)]
pub struct RunSummary {
    pub state: SnapshotState,
    pub findings: Vec<Finding>,
    pub url_total: usize,
    pub built_urls: usize,
    pub fetch_failures: usize,
}

/// Run the monitor once, writing the change report to `out`.
pub fn run_monitor(
    config: &Config,
    paths: &ProjectPaths,
    fetcher: &dyn PageFetcher,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let inputs = paths.input.load()?;
    inputs.check_keywords(config.matching.snapshot_case)?;
    let store = SnapshotStore::new(paths.cache.clone());
    let state = SnapshotState::of(&store);

    let mut findings = Vec::new();
    match state {
        SnapshotState::ValidSnapshot => {
            log::info!("Counting keywords and comparing links...");
            let prior = store.load()?;
            let diff = DiffEngine::new(fetcher, config.matching.diff_case).diff(&inputs, &prior)?;

            out.write_all(render_report(&diff.findings).as_bytes())?;
            out.flush()?;

            log::info!("Caching new data...");
            findings = diff.findings;
        }
        SnapshotState::NoValidSnapshot => {
            log::info!(
                "No valid snapshot in {}; building the first one",
                paths.cache.dir.display()
            );
        }
    }

    let build = SnapshotBuilder::new(fetcher, config.matching.snapshot_case).build(&inputs);
    store.replace(&build.snapshot)?;

    log::info!(
        "Successfully cached {} of {} sites",
        build.built_urls(),
        build.url_total
    );

    Ok(RunSummary {
        state,
        findings,
        url_total: build.url_total,
        built_urls: build.built_urls(),
        fetch_failures: build.fetch_failures,
    })
}
