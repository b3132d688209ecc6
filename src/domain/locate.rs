//! Trade table header detection.
//!
//! Real exports often prepend report-title and account-metadata rows before
//! the actual column header, so a fixed row-zero header cannot be assumed.
//! Detection is two-tier: the common case (header in row zero) is checked
//! first, and only when that row lacks required columns does a full scan run,
//! selecting the first row that contains every required column name.

use crate::domain::cell::{normalize_label, Cell, RawTable};
use crate::domain::error::ToxscreenError;

/// Normalized names that must all appear in the header row.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "ticket",
    "opentime",
    "closetime",
    "symbol",
    "volume",
    "profit",
];

/// A located table: the header row's normalized labels plus the body rows
/// that follow it. Consumes the raw table.
#[derive(Debug)]
pub struct LocatedTable {
    /// Index of the detected header row in the raw table.
    pub header_row: usize,
    /// Normalized column labels from the header row, in column order.
    pub labels: Vec<String>,
    /// All rows after the header row.
    pub body: Vec<Vec<Cell>>,
}

pub fn locate_table(raw: RawTable) -> Result<LocatedTable, ToxscreenError> {
    let index = match raw.first() {
        Some(row) if has_required_fields(row) => 0,
        _ => raw
            .iter()
            .position(|row| has_required_fields(row))
            .ok_or(ToxscreenError::HeaderNotFound)?,
    };

    let labels = normalized_labels(&raw[index]);
    let body = raw.into_iter().skip(index + 1).collect();

    Ok(LocatedTable {
        header_row: index,
        labels,
        body,
    })
}

fn normalized_labels(row: &[Cell]) -> Vec<String> {
    row.iter().map(|c| normalize_label(&c.as_text())).collect()
}

fn has_required_fields(row: &[Cell]) -> bool {
    let labels = normalized_labels(row);
    REQUIRED_FIELDS
        .iter()
        .all(|field| labels.iter().any(|label| label == field))
}
