//! Service layer for the monitor.
//!
//! - Page fetching (`PageFetcher`, `HttpFetcher`)

mod fetcher;
#[cfg(test)]
pub(crate) mod mock;

pub use fetcher::{HttpFetcher, PageContent, PageFetcher};
