//! Local filesystem snapshot store.
//!
//! A snapshot is only ever replaced as a whole. The new one is written to
//! a sibling staging directory first and renamed into place, so an
//! interrupted write leaves either the old snapshot or none at all.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{CachePaths, CountTable, LinkSet, Snapshot, parse_line_set};
use crate::storage::table::{read_table, write_table};

/// Snapshot directory on disk.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    paths: CachePaths,
}

impl SnapshotStore {
    pub fn new(paths: CachePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &CachePaths {
        &self.paths
    }

    /// Whether the directory holds both a count table and a link directory.
    ///
    /// Only existence is checked; a present but corrupt table still counts.
    pub fn is_valid(&self) -> bool {
        self.paths.dir.is_dir()
            && self.paths.keyword_count.is_file()
            && self.paths.site_caches.is_dir()
    }

    /// Read the count table. Link files are read on demand.
    pub fn load(&self) -> Result<PriorSnapshot> {
        let counts = read_table(&self.paths.keyword_count)?;
        log::debug!(
            "Loaded {} keyword counts from {}",
            counts.len(),
            self.paths.keyword_count.display()
        );
        Ok(PriorSnapshot {
            counts,
            paths: self.paths.clone(),
        })
    }

    /// Discard the current snapshot and store `snapshot` in its place.
    pub fn replace(&self, snapshot: &Snapshot) -> Result<()> {
        let staging = self.paths.rebased(staging_dir(&self.paths.dir));
        remove_path(&staging.dir)?;

        write_snapshot(&staging, snapshot)?;

        remove_path(&self.paths.dir)?;
        fs::rename(&staging.dir, &self.paths.dir)?;

        log::debug!(
            "Snapshot written to {} ({} counts, {} link sets)",
            self.paths.dir.display(),
            snapshot.counts.len(),
            snapshot.links.len()
        );
        Ok(())
    }
}

/// A loaded snapshot, read-only while the diff pass runs.
#[derive(Debug, Clone)]
pub struct PriorSnapshot {
    pub counts: CountTable,
    paths: CachePaths,
}

impl PriorSnapshot {
    /// Stored links for a URL, or `None` if no link file exists for it.
    ///
    /// Anything other than a readable regular file counts as missing.
    pub fn links(&self, url: &str) -> Option<LinkSet> {
        let path = self.paths.link_file(url)?;
        if !path.is_file() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(parse_line_set(&content)),
            Err(e) => {
                log::warn!("Failed to read link file {}: {}", path.display(), e);
                None
            }
        }
    }
}

fn write_snapshot(paths: &CachePaths, snapshot: &Snapshot) -> Result<()> {
    fs::create_dir_all(&paths.site_caches)?;

    let mut owners: HashMap<PathBuf, &str> = HashMap::new();
    for (url, links) in snapshot.links.iter() {
        let Some(path) = paths.link_file(url) else {
            log::warn!("Cannot derive a link storage file name for {}", url);
            continue;
        };
        if let Some(previous) = owners.insert(path.clone(), url) {
            log::warn!(
                "{} and {} share link storage file {}; keeping links of {}",
                previous,
                url,
                path.display(),
                url
            );
        }
        write_link_file(&path, links)?;
    }

    write_table(&paths.keyword_count, &snapshot.counts)
}

fn write_link_file(path: &Path, links: &LinkSet) -> Result<()> {
    let content = links
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, content)?;
    Ok(())
}

fn staging_dir(dir: &Path) -> PathBuf {
    let mut name = dir
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "cacheFolder".into());
    name.push(".staging");
    dir.with_file_name(name)
}

fn remove_path(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
