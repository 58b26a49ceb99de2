// src/models/mod.rs

//! Domain models for the monitor.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod input;
mod paths;
mod snapshot;

// Re-export all public types
pub use config::{CaseMode, Config, FetcherConfig, MatchingConfig};
pub use input::{KeywordSet, MonitorInputs, UrlSet, parse_line_set};
pub use paths::{CachePaths, InputPaths, ProjectPaths};
pub use snapshot::{CountTable, Finding, KeywordCount, LinkSet, LinkSnapshot, Snapshot};
