//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Keyword matching behavior
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {:?}. Using defaults.", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// How keyword occurrences are counted in page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Exact substring match
    Sensitive,
    /// Both page text and keyword are lowercased before matching
    Insensitive,
}

/// Keyword matching settings.
///
/// Snapshots count case-insensitively while the diff pass counts the
/// keyword exactly as written. Both are configurable so either behavior
/// can be pinned down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Counting mode used when building a snapshot
    #[serde(default = "defaults::snapshot_case")]
    pub snapshot_case: CaseMode,

    /// Counting mode used for fresh counts during the diff pass
    #[serde(default = "defaults::diff_case")]
    pub diff_case: CaseMode,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            snapshot_case: defaults::snapshot_case(),
            diff_case: defaults::diff_case(),
        }
    }
}

mod defaults {
    use super::CaseMode;

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; sitewatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn snapshot_case() -> CaseMode {
        CaseMode::Insensitive
    }
    pub fn diff_case() -> CaseMode {
        CaseMode::Sensitive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_keep_case_asymmetry() {
        let config = Config::default();
        assert_eq!(config.matching.snapshot_case, CaseMode::Insensitive);
        assert_eq!(config.matching.diff_case, CaseMode::Sensitive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [matching]
            diff_case = "insensitive"
            "#,
        )
        .unwrap();

        assert_eq!(config.matching.diff_case, CaseMode::Insensitive);
        assert_eq!(config.matching.snapshot_case, CaseMode::Insensitive);
        assert_eq!(config.fetcher.timeout_secs, 30);
    }

    #[test]
    fn test_unknown_case_mode_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [matching]
            diff_case = "sometimes"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.fetcher.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_blank_user_agent() {
        let mut config = Config::default();
        config.fetcher.user_agent = "   ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_on_broken_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[fetcher\nuser_agent = ").unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(config.fetcher.timeout_secs, 30);
    }

    #[test]
    fn test_load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[fetcher]\ntimeout_secs = 5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.fetcher.timeout_secs, 5);
        assert!(config.fetcher.user_agent.contains("sitewatch"));
    }
}
