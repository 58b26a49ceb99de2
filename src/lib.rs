// src/lib.rs

//! sitewatch library
//!
//! Snapshots keyword counts and outbound links of a set of pages, and
//! reports what changed since the previous snapshot.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
