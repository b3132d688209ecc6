//! Analyzed-trades CSV re-export.
//!
//! Flat delimited text: one header row with the canonical display names,
//! one record per line, all record fields plus the derived holding time and
//! category flags, in the same column order the trade table presents.

use crate::domain::error::ToxscreenError;
use crate::domain::report::{Report, TradeRow};
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

const EXPORT_COLUMNS: [&str; 10] = [
    "Ticket",
    "Symbol",
    "Volume",
    "Open Time",
    "Close Time",
    "Holding Seconds",
    "Profit",
    "Scalping",
    "HFT",
    "Arbitrage",
];

const TIME_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Render the trade rows as CSV text.
    pub fn render(trades: &[TradeRow]) -> Result<String, ToxscreenError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(EXPORT_COLUMNS).map_err(write_err)?;

        for row in trades {
            let volume = format_num(row.volume);
            let open_time = row.open_time.format(TIME_FORMAT).to_string();
            let close_time = row.close_time.format(TIME_FORMAT).to_string();
            let holding = format_num(row.holding_seconds);
            let profit = format_num(row.profit);
            writer
                .write_record([
                    row.ticket.as_str(),
                    row.symbol.as_str(),
                    volume.as_str(),
                    open_time.as_str(),
                    close_time.as_str(),
                    holding.as_str(),
                    profit.as_str(),
                    bool_label(row.scalping),
                    bool_label(row.hft_band),
                    bool_label(row.arbitrage_short),
                ])
                .map_err(write_err)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ToxscreenError::OutputWrite {
                reason: e.to_string(),
            })?;
        String::from_utf8(bytes).map_err(|e| ToxscreenError::OutputWrite {
            reason: e.to_string(),
        })
    }
}

impl Default for CsvExportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvExportAdapter {
    fn write(&self, report: &Report, output: &Path) -> Result<(), ToxscreenError> {
        let content = Self::render(&report.trades)?;
        fs::write(output, content)?;
        Ok(())
    }
}

fn write_err(e: csv::Error) -> ToxscreenError {
    ToxscreenError::OutputWrite {
        reason: e.to_string(),
    }
}

fn format_num(value: f64) -> String {
    format!("{value}")
}

fn bool_label(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
