//! Diff calculation against the stored snapshot.
//!
//! Compares freshly fetched pages with the prior snapshot to find
//! keywords that occur more often than before and links that were not
//! there before. Removed links and decreased counts are not reported.

use crate::error::Result;
use crate::models::{CaseMode, CountTable, Finding, KeywordSet, LinkSet, MonitorInputs};
use crate::services::PageFetcher;
use crate::storage::PriorSnapshot;
use crate::utils::text::count_occurrences;
use crate::utils::url::cache_file_name;

/// Summary of a diff pass.
#[derive(Debug, Default)]
pub struct DiffOutcome {
    pub findings: Vec<Finding>,
    pub url_total: usize,
    pub fetch_failures: usize,
    pub missing_link_caches: usize,
}

impl DiffOutcome {
    /// Check if there are any changes.
    pub fn has_changes(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Compares fresh pages with a prior snapshot.
pub struct DiffEngine<'a> {
    fetcher: &'a dyn PageFetcher,
    case: CaseMode,
}

impl<'a> DiffEngine<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, case: CaseMode) -> Self {
        Self { fetcher, case }
    }

    /// Diff every URL against `prior`.
    ///
    /// Fetch failures and missing link files only skip work for that URL.
    /// A missing count entry aborts the pass: the inputs no longer match
    /// what was snapshotted.
    pub fn diff(&self, inputs: &MonitorInputs, prior: &PriorSnapshot) -> Result<DiffOutcome> {
        let mut outcome = DiffOutcome {
            url_total: inputs.urls.len(),
            ..DiffOutcome::default()
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

            outcome.findings.extend(compare_keywords(
                url,
                &page.text,
                &inputs.keywords,
                &prior.counts,
                self.case,
            )?);

            match prior.links(url) {
                Some(stored) => {
                    outcome
                        .findings
                        .extend(compare_links(url, &page.links, &stored));
                }
                None => {
                    outcome.missing_link_caches += 1;
                    log::warn!(
                        "Could not find link storage file for {}",
                        cache_file_name(url).unwrap_or_else(|| url.clone())
                    );
                }
            }
        }

        Ok(outcome)
    }
}

/// Keyword findings for one page.
pub fn compare_keywords(
    url: &str,
    text: &str,
    keywords: &KeywordSet,
    prior: &CountTable,
    case: CaseMode,
) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    for keyword in keywords {
        let previous = prior.require(url, keyword)?;
        let current = count_occurrences(text, keyword, case);
        if current > previous {
            log::debug!("{}: '{}' {} -> {}", url, keyword, previous, current);
            findings.push(Finding::KeywordIncrease {
                url: url.to_string(),
                word: keyword.clone(),
                previous,
                current,
            });
        }
    }
    Ok(findings)
}

/// A single finding if `fresh` has links absent from `stored`.
pub fn compare_links(url: &str, fresh: &LinkSet, stored: &LinkSet) -> Option<Finding> {
    let added: LinkSet = fresh.difference(stored).cloned().collect();
    if added.is_empty() {
        return None;
    }
    log::debug!("{}: new links {:?}", url, added);
    Some(Finding::NewLinks {
        url: url.to_string(),
        links: added,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{CachePaths, LinkSnapshot, Snapshot};
    use crate::services::mock::StaticFetcher;
    use crate::storage::SnapshotStore;
    use tempfile::TempDir;

    fn links(items: &[&str]) -> LinkSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn keywords(items: &[&str]) -> KeywordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn stored(tmp: &TempDir, snapshot: &Snapshot) -> PriorSnapshot {
        let store = SnapshotStore::new(CachePaths::new(tmp.path().join("cacheFolder")));
        store.replace(snapshot).unwrap();
        store.load().unwrap()
    }

    fn snapshot_of(counts: &[(&str, &str, u64)], pages: &[(&str, Vec<&str>)]) -> Snapshot {
        let mut table = CountTable::new();
        for (url, word, count) in counts {
            table.insert(url, word, *count);
        }
        let mut link_snapshot = LinkSnapshot::new();
        for (url, items) in pages {
            link_snapshot.insert(*url, links(items));
        }
        Snapshot {
            counts: table,
            links: link_snapshot,
        }
    }

    #[test]
    fn test_compare_links_set_difference() {
        let finding = compare_links(
            "http://a.com",
            &links(&["B", "C"]),
            &links(&["A", "B"]),
        );
        assert_eq!(
            finding,
            Some(Finding::NewLinks {
                url: "http://a.com".into(),
                links: links(&["C"]),
            })
        );
    }

    #[test]
    fn test_compare_links_removed_only() {
        assert_eq!(compare_links("u", &links(&["B"]), &links(&["A", "B"])), None);
    }

    #[test]
    fn test_compare_links_many_new_is_one_finding() {
        let finding = compare_links("u", &links(&["C", "D", "E"]), &LinkSet::new());
        assert!(matches!(finding, Some(Finding::NewLinks { ref links, .. }) if links.len() == 3));
    }

    #[test]
    fn test_compare_keywords_increase_only() {
        let mut table = CountTable::new();
        table.insert("u", "sale", 1);
        table.insert("u", "deal", 3);

        let findings = compare_keywords(
            "u",
            "sale sale deal",
            &keywords(&["sale", "deal"]),
            &table,
            CaseMode::Sensitive,
        )
        .unwrap();

        assert_eq!(
            findings,
            vec![Finding::KeywordIncrease {
                url: "u".into(),
                word: "sale".into(),
                previous: 1,
                current: 2,
            }]
        );
    }

    #[test]
    fn test_compare_keywords_missing_entry_is_fatal() {
        let table = CountTable::new();
        let result = compare_keywords("u", "text", &keywords(&["sale"]), &table, CaseMode::Sensitive);
        assert!(matches!(result, Err(AppError::MissingCountEntry { .. })));
    }

    #[test]
    fn test_diff_sensitive_uses_keyword_as_written() {
        let mut table = CountTable::new();
        table.insert("u", "Sale", 1);

        // Snapshot stored "sale" lowercased; the diff looks for "Sale" exactly.
        let text = "sale sale Sale";
        let sensitive =
            compare_keywords("u", text, &keywords(&["Sale"]), &table, CaseMode::Sensitive).unwrap();
        let insensitive =
            compare_keywords("u", text, &keywords(&["Sale"]), &table, CaseMode::Insensitive)
                .unwrap();

        assert!(sensitive.is_empty());
        assert_eq!(insensitive.len(), 1);
    }

    #[test]
    fn test_scenario_keyword_and_link() {
        let tmp = TempDir::new().unwrap();
        let prior = stored(
            &tmp,
            &snapshot_of(&[("http://a.com", "sale", 2)], &[("http://a.com", vec!["http://x.com"])]),
        );
        let fetcher = StaticFetcher::new().with_page(
            "http://a.com",
            "sale sale sale sale sale",
            ["http://x.com", "http://y.com"],
        );
        let inputs = MonitorInputs::new(["http://a.com"], ["sale"]);

        let outcome = DiffEngine::new(&fetcher, CaseMode::Sensitive)
            .diff(&inputs, &prior)
            .unwrap();

        assert_eq!(
            outcome.findings,
            vec![
                Finding::KeywordIncrease {
                    url: "http://a.com".into(),
                    word: "sale".into(),
                    previous: 2,
                    current: 5,
                },
                Finding::NewLinks {
                    url: "http://a.com".into(),
                    links: links(&["http://y.com"]),
                },
            ]
        );
    }

    #[test]
    fn test_unchanged_pages_no_findings() {
        let tmp = TempDir::new().unwrap();
        let prior = stored(
            &tmp,
            &snapshot_of(
                &[("http://a.com", "sale", 1), ("http://b.com", "sale", 0)],
                &[("http://a.com", vec!["http://x.com"]), ("http://b.com", vec![])],
            ),
        );
        let fetcher = StaticFetcher::new()
            .with_page("http://a.com", "one sale", ["http://x.com"])
            .with_page("http://b.com", "none", Vec::<String>::new());
        let inputs = MonitorInputs::new(["http://a.com", "http://b.com"], ["sale"]);

        let outcome = DiffEngine::new(&fetcher, CaseMode::Sensitive)
            .diff(&inputs, &prior)
            .unwrap();

        assert!(!outcome.has_changes());
        assert_eq!(outcome.fetch_failures, 0);
        assert_eq!(outcome.missing_link_caches, 0);
    }

    #[test]
    fn test_fetch_failure_skips_url() {
        let tmp = TempDir::new().unwrap();
        let prior = stored(
            &tmp,
            &snapshot_of(
                &[
                    ("http://a.com", "sale", 0),
                    ("http://b.com", "sale", 0),
                    ("http://c.com", "sale", 0),
                ],
                &[("http://a.com", vec![]), ("http://b.com", vec![]), ("http://c.com", vec![])],
            ),
        );
        let fetcher = StaticFetcher::new()
            .with_page("http://a.com", "sale", Vec::<String>::new())
            .with_page("http://c.com", "sale", Vec::<String>::new());
        let inputs = MonitorInputs::new(["http://a.com", "http://b.com", "http://c.com"], ["sale"]);

        let outcome = DiffEngine::new(&fetcher, CaseMode::Sensitive)
            .diff(&inputs, &prior)
            .unwrap();

        assert_eq!(outcome.fetch_failures, 1);
        let urls: Vec<&str> = outcome.findings.iter().map(Finding::url).collect();
        assert_eq!(urls, vec!["http://a.com", "http://c.com"]);
    }

    #[test]
    fn test_missing_link_file_skips_link_comparison_only() {
        let tmp = TempDir::new().unwrap();
        let prior = stored(&tmp, &snapshot_of(&[("http://a.com", "sale", 0)], &[]));
        let fetcher =
            StaticFetcher::new().with_page("http://a.com", "sale", ["http://new.com"]);
        let inputs = MonitorInputs::new(["http://a.com"], ["sale"]);

        let outcome = DiffEngine::new(&fetcher, CaseMode::Sensitive)
            .diff(&inputs, &prior)
            .unwrap();

        assert_eq!(outcome.missing_link_caches, 1);
        assert_eq!(outcome.findings.len(), 1);
        assert!(matches!(outcome.findings[0], Finding::KeywordIncrease { .. }));
    }

    #[test]
    fn test_link_cache_directory_counts_as_missing() {
        let tmp = TempDir::new().unwrap();
        let prior = stored(&tmp, &snapshot_of(&[("http://a.com", "sale", 0)], &[]));
        std::fs::create_dir(tmp.path().join("cacheFolder/siteCaches/a.com")).unwrap();
        let fetcher =
            StaticFetcher::new().with_page("http://a.com", "sale", ["http://new.com"]);
        let inputs = MonitorInputs::new(["http://a.com"], ["sale"]);

        let outcome = DiffEngine::new(&fetcher, CaseMode::Sensitive)
            .diff(&inputs, &prior)
            .unwrap();

        assert_eq!(outcome.missing_link_caches, 1);
        assert_eq!(
            outcome.findings,
            vec![Finding::KeywordIncrease {
                url: "http://a.com".into(),
                word: "sale".into(),
                previous: 0,
                current: 1,
            }]
        );
    }

    #[test]
    fn test_keyword_drift_aborts() {
        let tmp = TempDir::new().unwrap();
        let prior = stored(
            &tmp,
            &snapshot_of(&[("http://a.com", "sale", 0)], &[("http://a.com", vec![])]),
        );
        let fetcher = StaticFetcher::new().with_page("http://a.com", "sale", Vec::<String>::new());
        let inputs = MonitorInputs::new(["http://a.com"], ["sale", "discount"]);

        let result = DiffEngine::new(&fetcher, CaseMode::Sensitive).diff(&inputs, &prior);

        assert!(matches!(
            result,
            Err(AppError::MissingCountEntry { ref word, .. }) if word == "discount"
        ));
    }

    #[test]
    fn test_unreachable_url_does_not_need_entries() {
        let tmp = TempDir::new().unwrap();
        let prior = stored(&tmp, &Snapshot::default());
        let fetcher = StaticFetcher::new();
        let inputs = MonitorInputs::new(["http://down.com"], ["sale"]);

        let outcome = DiffEngine::new(&fetcher, CaseMode::Sensitive)
            .diff(&inputs, &prior)
            .unwrap();

        assert!(outcome.findings.is_empty());
        assert_eq!(outcome.fetch_failures, 1);
    }
}
