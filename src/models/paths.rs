//! Project folder layout.
//!
//! ```text
//! {project}/
//! ├── config.toml           # Optional settings
//! ├── inputFolder/
//! │   ├── urlFile           # One URL per line
//! │   └── keyFile           # One keyword per line
//! └── cacheFolder/          # Snapshot (replaced on every run)
//!     ├── keywordCount.csv
//!     └── siteCaches/
//!         └── {host}        # One link per line
//! ```

use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::MonitorInputs;
use crate::utils::url::cache_file_name;

/// All paths derived from the project folder.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub input: InputPaths,
    pub cache: CachePaths,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_file: root.join("config.toml"),
            input: InputPaths::new(root.join("inputFolder")),
            cache: CachePaths::new(root.join("cacheFolder")),
            root,
        }
    }
}

/// Location of the URL and keyword list files.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub dir: PathBuf,
    pub url_file: PathBuf,
    pub key_file: PathBuf,
}

impl InputPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            url_file: dir.join("urlFile"),
            key_file: dir.join("keyFile"),
            dir,
        }
    }

    /// Check that the folder and both list files exist.
    pub fn validate(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(AppError::invalid_input(&self.dir, "not a directory"));
        }

        let missing: Vec<&str> = [("urlFile", &self.url_file), ("keyFile", &self.key_file)]
            .into_iter()
            .filter(|(_, path)| !path.is_file())
            .map(|(name, _)| name)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::invalid_input(
                &self.dir,
                format!("missing {}", missing.join(", ")),
            ));
        }
        Ok(())
    }

    /// Validate the folder and read both lists.
    pub fn load(&self) -> Result<MonitorInputs> {
        self.validate()?;
        MonitorInputs::read(&self.url_file, &self.key_file)
    }
}

/// Location of the snapshot files.
#[derive(Debug, Clone)]
pub struct CachePaths {
    pub dir: PathBuf,
    pub keyword_count: PathBuf,
    pub site_caches: PathBuf,
}

impl CachePaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            keyword_count: dir.join("keywordCount.csv"),
            site_caches: dir.join("siteCaches"),
            dir,
        }
    }

    /// Same layout rooted somewhere else.
    pub fn rebased(&self, dir: impl Into<PathBuf>) -> Self {
        Self::new(dir)
    }

    /// Link file for a monitored URL, if the URL has a usable host.
    pub fn link_file(&self, url: &str) -> Option<PathBuf> {
        cache_file_name(url).map(|name| self.site_caches.join(name))
    }
}
