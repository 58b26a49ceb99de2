//! URL and keyword lists.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::CaseMode;

/// Monitored page URLs.
pub type UrlSet = BTreeSet<String>;

/// Tracked keywords, case preserved as written.
pub type KeywordSet = BTreeSet<String>;

/// The immutable inputs of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorInputs {
    pub urls: UrlSet,
    pub keywords: KeywordSet,
}

impl MonitorInputs {
    pub fn new<U, K>(urls: U, keywords: K) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Read both list files.
    pub fn read(url_file: &Path, key_file: &Path) -> Result<Self> {
        let urls = parse_line_set(&fs::read_to_string(url_file)?);
        let keywords = parse_line_set(&fs::read_to_string(key_file)?);

        if urls.is_empty() {
            log::warn!("URL list {} is empty", url_file.display());
        }
        if keywords.is_empty() {
            log::warn!("Keyword list {} is empty", key_file.display());
        }
        log::info!(
            "Loaded {} urls and {} keywords",
            urls.len(),
            keywords.len()
        );

        Ok(Self { urls, keywords })
    }

    /// Reject keywords the count table cannot tell apart.
    ///
    /// Table words are stored lowercased, so with case-sensitive
    /// snapshot counts `Sale` and `sale` would share one entry.
    pub fn check_keywords(&self, snapshot_case: CaseMode) -> Result<()> {
        if snapshot_case == CaseMode::Insensitive {
            return Ok(());
        }

        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for keyword in &self.keywords {
            if let Some(other) = seen.insert(keyword.to_lowercase(), keyword) {
                return Err(AppError::validation(format!(
                    "keywords '{other}' and '{keyword}' differ only in case; \
                     case-sensitive snapshot counts cannot store both"
                )));
            }
        }
        Ok(())
    }
}

/// Split a list file into a set of its non-blank lines.
pub fn parse_line_set(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
