// src/pipeline/build.rs

//! Snapshot building.

use crate::models::{CaseMode, CountTable, LinkSnapshot, MonitorInputs, Snapshot};
use crate::services::PageFetcher;
use crate::utils::text::count_occurrences;

/// Summary of a build pass.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub snapshot: Snapshot,
    pub url_total: usize,
    pub fetch_failures: usize,
}

impl BuildOutcome {
    /// URLs that made it into the snapshot.
    pub fn built_urls(&self) -> usize {
        self.url_total - self.fetch_failures
    }
}

/// Fetches every page and records keyword counts and links.
pub struct SnapshotBuilder<'a> {
    fetcher: &'a dyn PageFetcher,
    case: CaseMode,
}

impl<'a> SnapshotBuilder<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, case: CaseMode) -> Self {
        Self { fetcher, case }
    }

    /// Build a snapshot. Unreachable URLs are skipped and contribute nothing.
    pub fn build(&self, inputs: &MonitorInputs) -> BuildOutcome {
        let mut counts = CountTable::new();
        let mut links = LinkSnapshot::new();
        let mut outcome = BuildOutcome {
            url_total: inputs.urls.len(),
            ..BuildOutcome::default()
        };

        for url in &inputs.urls {
            let page = match self.fetcher.fetch(url) {
                Ok(page) => page,
                Err(error) => {
                    outcome.fetch_failures += 1;
                    log::warn!("Could not fetch url {}: {}", url, error);
                    continue;
                }
            };

            for keyword in &inputs.keywords {
                let count = count_occurrences(&page.text, keyword, self.case);
                log::debug!("{}: '{}' x{}", url, keyword, count);
                counts.insert(url, keyword, count);
            }
            links.insert(url.clone(), page.links);
        }

        outcome.snapshot = Snapshot { counts, links };
        outcome
    }
}
