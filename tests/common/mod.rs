#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use toxscreen::domain::cell::{Cell, RawTable};
use toxscreen::domain::error::ToxscreenError;
use toxscreen::ports::table_port::TablePort;

/// In-memory table port for pipeline tests that do not touch the filesystem.
pub struct MockTablePort {
    pub table: RawTable,
    pub error: Option<String>,
}

impl MockTablePort {
    pub fn new(table: RawTable) -> Self {
        Self { table, error: None }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            table: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl TablePort for MockTablePort {
    fn load_table(&self, path: &Path) -> Result<RawTable, ToxscreenError> {
        if let Some(reason) = &self.error {
            return Err(ToxscreenError::FileRead {
                file: path.display().to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.table.clone())
    }
}

pub fn text_row(cells: &[&str]) -> Vec<Cell> {
    cells.iter().map(|s| Cell::Text(s.to_string())).collect()
}

pub fn standard_header() -> Vec<Cell> {
    text_row(&["Ticket", "Open Time", "Close Time", "Symbol", "Volume", "Profit"])
}

pub fn trade_row(
    ticket: &str,
    open: &str,
    close: &str,
    symbol: &str,
    volume: &str,
    profit: &str,
) -> Vec<Cell> {
    text_row(&[ticket, open, close, symbol, volume, profit])
}

pub fn write_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn write_temp_ini(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
