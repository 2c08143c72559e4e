//! Header-driven extraction of (CONTENT, TIMESTAMP) pairs from a grid.
//!
//! Malformed sheets never fail the extraction: rows that cannot yield content
//! are skipped and a missing TIMESTAMP column just leaves timestamps empty.

use super::sheet_models::{ContentRecord, SpreadsheetGrid};

pub const CONTENT_COLUMN: &str = "CONTENT";
pub const TIMESTAMP_COLUMN: &str = "TIMESTAMP";

/// Positions of the recognised columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub content: Option<usize>,
    pub timestamp: Option<usize>,
}

impl ColumnIndex {
    /// Matches header cells case-insensitively; the first matching cell wins.
    pub fn from_header(header: &[String]) -> Self {
        Self {
            content: find_column(header, CONTENT_COLUMN),
            timestamp: find_column(header, TIMESTAMP_COLUMN),
        }
    }
}

fn find_column(header: &[String], name: &str) -> Option<usize> {
    header.iter().position(|cell| cell.to_uppercase() == name)
}

/// Extracts chat records from `grid`, in row order.
///
/// Row 0 is the header and is never emitted. A row is dropped when it is too
/// short to reach the CONTENT column or its CONTENT cell is empty. Empty
/// TIMESTAMP cells come back as `None`.
pub fn extract(grid: &SpreadsheetGrid) -> Vec<ContentRecord> {
    let rows = grid.rows();
    if rows.len() < 2 {
        return Vec::new();
    }

    let columns = ColumnIndex::from_header(&rows[0]);
    tracing::debug!(
        "Column indices - CONTENT: {:?}, TIMESTAMP: {:?}",
        columns.content,
        columns.timestamp
    );

    let Some(content_col) = columns.content else {
        tracing::warn!("Sheet has no CONTENT column; nothing to extract");
        return Vec::new();
    };

    rows[1..]
        .iter()
        .filter_map(|row| {
            let content = row.get(content_col).filter(|cell| !cell.is_empty())?;
            let timestamp = columns
                .timestamp
                .and_then(|col| row.get(col))
                .filter(|cell| !cell.is_empty())
                .cloned();

            Some(ContentRecord {
                content: content.clone(),
                timestamp,
            })
        })
        .collect()
}
