//! Snapshot persistence.
//!
//! ## Directory Structure
//!
//! ```text
//! cacheFolder/
//! ├── keywordCount.csv      # url,word,count
//! └── siteCaches/
//!     ├── a.com             # Links seen on http://a.com, one per line
//!     └── b.org
//! ```

pub mod local;
pub mod table;

// Re-export for convenience
pub use local::{PriorSnapshot, SnapshotStore};
