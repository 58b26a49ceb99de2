//! In-memory fetcher for tests.

use std::collections::HashMap;

use crate::error::FetchError;
use crate::services::{PageContent, PageFetcher};

/// Serves canned pages. Unknown URLs answer HTTP 404.
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    pages: HashMap<String, PageContent>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page<L>(mut self, url: &str, text: &str, links: L) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
    {
        self.pages
            .insert(url.to_string(), PageContent::new(text, links));
        self
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        self.pages.get(url).cloned().ok_or(FetchError::Status(404))
    }
}
