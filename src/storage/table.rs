// src/storage/table.rs

//! Keyword-count table codec.
//!
//! CSV with header `url,word,count`. Reading matches columns by header
//! name, so tables carrying an extra leading index column still load.

use std::path::Path;

use crate::error::Result;
use crate::models::{CountTable, KeywordCount};

const HEADER: [&str; 3] = ["url", "word", "count"];

/// Write the table, rows ordered by (url, word).
pub fn write_table(path: &Path, table: &CountTable) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    // Written by hand so an empty table still has a header.
    writer.write_record(HEADER)?;
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a table written by [`write_table`].
pub fn read_table(path: &Path) -> Result<CountTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut table = CountTable::new();
    for row in reader.deserialize::<KeywordCount>() {
        let row = row?;
        table.insert(&row.url, &row.word, row.count);
    }
    Ok(table)
}
