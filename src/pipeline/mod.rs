//! Pipeline entry points for monitor operations.
//!
//! - `SnapshotBuilder`: Fetch pages and record keyword counts and links
//! - `DiffEngine`: Compare fresh pages with the stored snapshot
//! - `render_report`: Format findings for the operator
//! - `run_monitor`: Diff (when possible), then rebuild

pub mod build;
pub mod diff;
pub mod monitor;
pub mod report;

pub use build::{BuildOutcome, SnapshotBuilder};
pub use diff::{DiffEngine, DiffOutcome};
pub use monitor::{RunSummary, SnapshotState, run_monitor};
pub use report::render_report;
