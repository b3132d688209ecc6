//! Classification thresholds.
//!
//! An explicit value object rather than module-level constants, so alternate
//! threshold sets can be exercised in tests and overridden from the
//! `[thresholds]` config section without recompilation.

use crate::domain::error::ToxscreenError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Holding time at or below which a trade counts as scalping (seconds).
    pub scalping_seconds: f64,
    /// Holding time band contributing to HFT suspicion (seconds).
    pub hft_holding_seconds: f64,
    /// Minimum peak trades-per-minute required for HFT suspicion.
    pub hft_trades_per_min: usize,
    /// Ultra-short holding time treated as a latency-arbitrage proxy (seconds).
    pub arbitrage_seconds: f64,
    /// Win rate at or above which the arbitrage-short subset is suspect.
    pub arbitrage_winrate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            scalping_seconds: 180.0,
            hft_holding_seconds: 60.0,
            hft_trades_per_min: 5,
            arbitrage_seconds: 10.0,
            arbitrage_winrate: 0.80,
        }
    }
}

impl Thresholds {
    /// Build thresholds from the `[thresholds]` config section, falling back
    /// to the defaults for absent keys. Out-of-range values are rejected
    /// rather than silently corrected.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, ToxscreenError> {
        let defaults = Self::default();
        let thresholds = Self {
            scalping_seconds: config.get_double(
                "thresholds",
                "scalping_seconds",
                defaults.scalping_seconds,
            ),
            hft_holding_seconds: config.get_double(
                "thresholds",
                "hft_holding_seconds",
                defaults.hft_holding_seconds,
            ),
            hft_trades_per_min: config.get_int(
                "thresholds",
                "hft_trades_per_min",
                defaults.hft_trades_per_min as i64,
            ) as usize,
            arbitrage_seconds: config.get_double(
                "thresholds",
                "arbitrage_seconds",
                defaults.arbitrage_seconds,
            ),
            arbitrage_winrate: config.get_double(
                "thresholds",
                "arbitrage_winrate",
                defaults.arbitrage_winrate,
            ),
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    fn validate(&self) -> Result<(), ToxscreenError> {
        let invalid = |key: &str, reason: &str| ToxscreenError::ConfigInvalid {
            section: "thresholds".to_string(),
            key: key.to_string(),
            reason: reason.to_string(),
        };

        if self.scalping_seconds < 0.0 {
            return Err(invalid("scalping_seconds", "must be non-negative"));
        }
        if self.hft_holding_seconds < 0.0 {
            return Err(invalid("hft_holding_seconds", "must be non-negative"));
        }
        if self.hft_trades_per_min < 1 {
            return Err(invalid("hft_trades_per_min", "must be at least 1"));
        }
        if self.arbitrage_seconds < 0.0 {
            return Err(invalid("arbitrage_seconds", "must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.arbitrage_winrate) {
            return Err(invalid("arbitrage_winrate", "must be between 0 and 1"));
        }
        Ok(())
    }
}
