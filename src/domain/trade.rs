//! Canonical trade record.

use crate::domain::thresholds::Thresholds;
use chrono::NaiveDateTime;

/// One closed trade from the export, after normalization.
///
/// `close_time >= open_time` is not guaranteed: some exports carry clock
/// anomalies, and a negative holding time passes through unmodified rather
/// than being clamped or rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub ticket: String,
    pub symbol: String,
    pub volume: f64,
    pub open_time: NaiveDateTime,
    pub close_time: NaiveDateTime,
    pub profit: f64,
}

impl TradeRecord {
    /// Holding duration in seconds, signed.
    pub fn holding_seconds(&self) -> f64 {
        (self.close_time - self.open_time).num_milliseconds() as f64 / 1000.0
    }

    pub fn is_scalping(&self, thresholds: &Thresholds) -> bool {
        self.holding_seconds() <= thresholds.scalping_seconds
    }

    pub fn is_hft_band(&self, thresholds: &Thresholds) -> bool {
        self.holding_seconds() <= thresholds.hft_holding_seconds
    }

    pub fn is_arbitrage_short(&self, thresholds: &Thresholds) -> bool {
        self.holding_seconds() <= thresholds.arbitrage_seconds
    }
}
