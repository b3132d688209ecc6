//! Aggregate feature computation.

use crate::domain::thresholds::Thresholds;
use crate::domain::trade::TradeRecord;
use std::collections::HashMap;

/// Dataset-level features feeding the toxicity scorer. Recomputed from
/// scratch whenever the dataset changes; there is no incremental path.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateFeatures {
    pub total_trades: usize,
    pub total_profit: f64,
    pub scalp_trade_count: usize,
    pub scalp_profit: f64,
    /// Peak number of trades opened within any single minute bucket.
    pub max_trades_per_minute: usize,
    /// Mean holding time in seconds; 0 for an empty dataset, never NaN.
    pub avg_holding_seconds: f64,
    pub arbitrage_short_count: usize,
    /// Win rate among arbitrage-short trades. `None` when no such trades
    /// exist — distinct from a genuine 0% win rate.
    pub arbitrage_winrate: Option<f64>,
    /// Both the holding-time and trade-frequency conditions must hold.
    pub hft_suspect: bool,
    pub arbitrage_suspect: bool,
}

impl AggregateFeatures {
    /// Single pass over the dataset plus one minute-bucket grouping pass.
    pub fn compute(dataset: &[TradeRecord], thresholds: &Thresholds) -> Self {
        let mut total_profit = 0.0_f64;
        let mut holding_sum = 0.0_f64;
        let mut scalp_trade_count = 0usize;
        let mut scalp_profit = 0.0_f64;
        let mut arbitrage_short_count = 0usize;
        let mut arbitrage_wins = 0usize;
        let mut minute_buckets: HashMap<i64, usize> = HashMap::new();

        for trade in dataset {
            let holding = trade.holding_seconds();
            total_profit += trade.profit;
            holding_sum += holding;

            if trade.is_scalping(thresholds) {
                scalp_trade_count += 1;
                scalp_profit += trade.profit;
            }
            if trade.is_arbitrage_short(thresholds) {
                arbitrage_short_count += 1;
                if trade.profit > 0.0 {
                    arbitrage_wins += 1;
                }
            }

            // Tickets are not guaranteed unique in real exports, so buckets
            // count rows rather than distinct tickets.
            let minute = trade.open_time.and_utc().timestamp().div_euclid(60);
            *minute_buckets.entry(minute).or_insert(0) += 1;
        }

        let total_trades = dataset.len();
        let max_trades_per_minute = minute_buckets.values().copied().max().unwrap_or(0);
        let avg_holding_seconds = if total_trades > 0 {
            holding_sum / total_trades as f64
        } else {
            0.0
        };

        let hft_suspect = avg_holding_seconds <= thresholds.hft_holding_seconds
            && max_trades_per_minute >= thresholds.hft_trades_per_min;

        let arbitrage_winrate = if arbitrage_short_count > 0 {
            Some(arbitrage_wins as f64 / arbitrage_short_count as f64)
        } else {
            None
        };
        let arbitrage_suspect =
            arbitrage_winrate.is_some_and(|rate| rate >= thresholds.arbitrage_winrate);

        AggregateFeatures {
            total_trades,
            total_profit,
            scalp_trade_count,
            scalp_profit,
            max_trades_per_minute,
            avg_holding_seconds,
            arbitrage_short_count,
            arbitrage_winrate,
            hft_suspect,
            arbitrage_suspect,
        }
    }
}
