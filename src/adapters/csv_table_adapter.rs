//! CSV file table adapter.
//!
//! Reads a CSV export as a headerless grid of loosely-typed cells. Rows may
//! have uneven lengths (metadata lines above the real table usually do), so
//! the reader runs in flexible mode. Header detection happens later in the
//! domain; this adapter never interprets the grid.

use crate::domain::cell::{Cell, RawTable};
use crate::domain::error::ToxscreenError;
use crate::ports::table_port::TablePort;
use std::fs;
use std::path::Path;

pub struct CsvTableAdapter;

impl CsvTableAdapter {
    pub fn new() -> Self {
        Self
    }

    fn typed_cell(field: &str) -> Cell {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }
}

impl Default for CsvTableAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl TablePort for CsvTableAdapter {
    fn load_table(&self, path: &Path) -> Result<RawTable, ToxscreenError> {
        let content = fs::read_to_string(path).map_err(|e| ToxscreenError::FileRead {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut table = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| ToxscreenError::FileRead {
                file: path.display().to_string(),
                reason: format!("CSV parse error: {e}"),
            })?;
            table.push(record.iter().map(Self::typed_cell).collect());
        }

        Ok(table)
    }
}
