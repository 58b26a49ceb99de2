// src/services/fetcher.rs

//! Page fetching.
//!
//! Retrieves a page and reduces it to the two things the monitor
//! cares about: its text and its absolute outbound links.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::error::{FetchError, Result};
use crate::models::{FetcherConfig, LinkSet};
use crate::utils::url::is_absolute_http;

/// Text and links extracted from a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Concatenated text nodes of the document
    pub text: String,

    /// `href` targets of anchors that are absolute http(s) URLs
    pub links: LinkSet,
}

impl PageContent {
    pub fn new<L>(text: impl Into<String>, links: L) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            text: text.into(),
            links: links.into_iter().map(Into::into).collect(),
        }
    }

    /// Extract text and links from an HTML document.
    pub fn from_html(html: &str) -> std::result::Result<Self, FetchError> {
        let document = Html::parse_document(html);
        let anchor_sel = parse_selector("a[href]")?;

        let text: String = document.root_element().text().collect();
        let links = document
            .select(&anchor_sel)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| is_absolute_http(href))
            .map(str::to_string)
            .collect();

        Ok(Self { text, links })
    }
}

/// Source of page contents. One attempt per call, no retries.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<PageContent, FetchError>;
}

/// Fetches pages over HTTP.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a configured blocking client.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<PageContent, FetchError> {
        let response = self.client.get(url).send()?;
        check_status(response.status())?;

        let html = response.text()?;
        PageContent::from_html(&html)
    }
}

/// Only 2xx responses carry a page worth reading.
fn check_status(status: StatusCode) -> std::result::Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status(status.as_u16()))
    }
}

fn parse_selector(s: &str) -> std::result::Result<Selector, FetchError> {
    Selector::parse(s).map_err(|e| FetchError::Parse(format!("invalid selector '{s}': {e:?}")))
}
