//! Trade record normalization.
//!
//! Maps located table columns to canonical fields and coerces row values.
//! The drop/default policy is asymmetric on purpose: a trade without valid
//! open and close times cannot be classified at all, so the row is dropped;
//! an unreadable profit or volume has a usable default of 0, so the row is
//! kept. Both outcomes are counted in [`DataQuality`] instead of logged ad
//! hoc, so data-quality expectations are testable.

use crate::domain::cell::{parse_number, parse_timestamp, Cell};
use crate::domain::error::ToxscreenError;
use crate::domain::locate::LocatedTable;
use crate::domain::trade::TradeRecord;

/// Canonical fields in mapping order: (normalized name, display name).
const CANONICAL_FIELDS: [(&str, &str); 6] = [
    ("ticket", "Ticket"),
    ("opentime", "Open Time"),
    ("closetime", "Close Time"),
    ("symbol", "Symbol"),
    ("volume", "Volume"),
    ("profit", "Profit"),
];

/// Row-level anomaly counters from a normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DataQuality {
    /// Body rows fed into normalization.
    pub rows_in: usize,
    /// Rows excluded because open or close time failed to parse.
    pub rows_dropped: usize,
    /// Profit values substituted with 0.
    pub profit_defaulted: usize,
    /// Volume values substituted with 0.
    pub volume_defaulted: usize,
}

/// Result of a normalization pass: the immutable dataset plus its
/// data-quality counters.
#[derive(Debug)]
pub struct Normalized {
    pub dataset: Vec<TradeRecord>,
    pub quality: DataQuality,
}

/// Indices of the canonical columns within a located table's rows.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    pub ticket: usize,
    pub open_time: usize,
    pub close_time: usize,
    pub symbol: usize,
    pub volume: usize,
    pub profit: usize,
}

/// Resolve canonical field positions from the normalized header labels.
/// Fails with the list of absent display names when the mapping is partial.
pub fn map_columns(labels: &[String]) -> Result<ColumnMap, ToxscreenError> {
    let mut indices = [None; 6];
    let mut missing = Vec::new();

    for (slot, (normalized, display)) in CANONICAL_FIELDS.iter().enumerate() {
        match labels.iter().position(|label| label == normalized) {
            Some(index) => indices[slot] = Some(index),
            None => missing.push(display.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(ToxscreenError::MissingColumns { columns: missing });
    }

    Ok(ColumnMap {
        ticket: indices[0].unwrap(),
        open_time: indices[1].unwrap(),
        close_time: indices[2].unwrap(),
        symbol: indices[3].unwrap(),
        volume: indices[4].unwrap(),
        profit: indices[5].unwrap(),
    })
}

/// Produce the canonical dataset from a located table.
pub fn normalize_table(table: &LocatedTable) -> Result<Normalized, ToxscreenError> {
    let columns = map_columns(&table.labels)?;

    let mut dataset = Vec::with_capacity(table.body.len());
    let mut quality = DataQuality {
        rows_in: table.body.len(),
        ..DataQuality::default()
    };

    for row in &table.body {
        let open_time = parse_timestamp(cell_at(row, columns.open_time));
        let close_time = parse_timestamp(cell_at(row, columns.close_time));
        let (Some(open_time), Some(close_time)) = (open_time, close_time) else {
            quality.rows_dropped += 1;
            continue;
        };

        let volume = match parse_number(cell_at(row, columns.volume)) {
            Some(v) => v,
            None => {
                quality.volume_defaulted += 1;
                0.0
            }
        };
        let profit = match parse_number(cell_at(row, columns.profit)) {
            Some(p) => p,
            None => {
                quality.profit_defaulted += 1;
                0.0
            }
        };

        dataset.push(TradeRecord {
            ticket: cell_at(row, columns.ticket).as_text(),
            symbol: cell_at(row, columns.symbol).as_text(),
            volume,
            open_time,
            close_time,
            profit,
        });
    }

    Ok(Normalized { dataset, quality })
}

static EMPTY_CELL: Cell = Cell::Empty;

/// Rows may be ragged; a column beyond the row's end reads as empty.
fn cell_at(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&EMPTY_CELL)
}
