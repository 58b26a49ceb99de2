//! Snapshot data structures.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Absolute http(s) links seen on one page.
pub type LinkSet = BTreeSet<String>;

/// One row of the keyword-count table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    /// Monitored page URL
    pub url: String,

    /// Keyword, lowercased
    pub word: String,

    /// Occurrences of the word on the page at snapshot time
    pub count: u64,
}

/// Keyword-count table keyed by (url, lowercased word).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    entries: BTreeMap<(String, String), u64>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a count. The word is lowercased; an existing entry is kept.
    pub fn insert(&mut self, url: &str, word: &str, count: u64) {
        self.entries
            .entry((url.to_string(), word.to_lowercase()))
            .or_insert(count);
    }

    /// Look up the count for a keyword as written in the keyword list.
    pub fn get(&self, url: &str, keyword: &str) -> Option<u64> {
        self.entries
            .get(&(url.to_string(), keyword.to_lowercase()))
            .copied()
    }

    /// Like [`get`](Self::get), but a missing entry is an error.
    pub fn require(&self, url: &str, keyword: &str) -> Result<u64> {
        self.get(url, keyword)
            .ok_or_else(|| AppError::missing_count(url, keyword.to_lowercase()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in (url, word) order.
    pub fn rows(&self) -> impl Iterator<Item = KeywordCount> + '_ {
        self.entries.iter().map(|((url, word), count)| KeywordCount {
            url: url.clone(),
            word: word.clone(),
            count: *count,
        })
    }
}

impl FromIterator<KeywordCount> for CountTable {
    fn from_iter<I: IntoIterator<Item = KeywordCount>>(iter: I) -> Self {
        let mut table = CountTable::new();
        for row in iter {
            table.insert(&row.url, &row.word, row.count);
        }
        table
    }
}

/// Link sets of every page that was fetched successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSnapshot {
    pages: BTreeMap<String, LinkSet>,
}

impl LinkSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, links: LinkSet) {
        self.pages.insert(url.into(), links);
    }

    pub fn get(&self, url: &str) -> Option<&LinkSet> {
        self.pages.get(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LinkSet)> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Keyword counts and link sets observed in one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub counts: CountTable,
    pub links: LinkSnapshot,
}

/// A change detected by the diff pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A keyword occurs more often than in the snapshot
    KeywordIncrease {
        url: String,
        word: String,
        previous: u64,
        current: u64,
    },
    /// The page links somewhere it did not link before
    NewLinks { url: String, links: LinkSet },
}

impl Finding {
    pub fn url(&self) -> &str {
        match self {
            Finding::KeywordIncrease { url, .. } | Finding::NewLinks { url, .. } => url,
        }
    }
}
