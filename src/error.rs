// src/error.rs

//! Unified error handling for the monitor.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for monitor operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Every variant is fatal for the run. Per-URL problems are reported
/// through [`FetchError`] and handled where they occur.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be constructed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Keyword-count table could not be read or written
    #[error("Keyword count table error: {0}")]
    Csv(#[from] csv::Error),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required input files are absent
    #[error("Input folder {} is invalid: {reason}", .path.display())]
    InvalidInputFolder { path: PathBuf, reason: String },

    /// The prior snapshot has no count for a (url, word) pair being compared
    #[error(
        "No cached count for word '{word}' on {url}; either the URL or keyword list changed \
         since the last snapshot, or the page could not be fetched when it was built \
         (delete the cache folder to start over)"
    )]
    MissingCountEntry { url: String, word: String },
}

impl AppError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid input folder error.
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInputFolder {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing count entry error.
    pub fn missing_count(url: impl Into<String>, word: impl Into<String>) -> Self {
        Self::MissingCountEntry {
            url: url.into(),
            word: word.into(),
        }
    }
}

/// Failure to fetch a single page. Callers log it and skip the URL.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network or protocol failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server responded with HTTP {0}")]
    Status(u16),

    /// Page body could not be parsed
    #[error("could not parse page: {0}")]
    Parse(String),
}
