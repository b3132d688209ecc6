//! Report assembly for presentation consumers.
//!
//! Everything here is derived, presentation-facing data: the canonical
//! dataset is never mutated. Sorting for the equity curve and category
//! filtering both produce new views.

use crate::domain::features::AggregateFeatures;
use crate::domain::normalize::DataQuality;
use crate::domain::score::{assess, RiskTier, ToxicityAssessment};
use crate::domain::thresholds::Thresholds;
use crate::domain::trade::TradeRecord;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Headline metrics for the summary panel and the `--json` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_trades: usize,
    pub total_profit: f64,
    pub scalp_trades: usize,
    pub scalp_profit: f64,
    pub max_trades_per_minute: usize,
    pub avg_holding_seconds: f64,
    pub hft_suspect: bool,
    pub arbitrage_suspect: bool,
    pub arbitrage_winrate: Option<f64>,
    pub toxicity_score: f64,
    pub risk_tier: RiskTier,
}

/// One point of the cumulative-profit series.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub close_time: NaiveDateTime,
    pub cumulative_profit: f64,
}

/// One holding-time band and its trade count.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingBucket {
    pub label: String,
    pub count: usize,
}

/// A display row: record fields plus derived values and category flags.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub ticket: String,
    pub symbol: String,
    pub volume: f64,
    pub open_time: NaiveDateTime,
    pub close_time: NaiveDateTime,
    pub holding_seconds: f64,
    pub profit: f64,
    pub scalping: bool,
    pub hft_band: bool,
    pub arbitrage_short: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Scalping,
    HftBand,
    ArbitrageShort,
}

/// Full analysis output consumed by the report and export adapters.
#[derive(Debug)]
pub struct Report {
    pub summary: Summary,
    pub equity_curve: Vec<EquityPoint>,
    pub histogram: Vec<HoldingBucket>,
    pub trades: Vec<TradeRow>,
    pub quality: DataQuality,
}

impl Report {
    pub fn build(dataset: &[TradeRecord], quality: DataQuality, thresholds: &Thresholds) -> Self {
        let features = AggregateFeatures::compute(dataset, thresholds);
        let assessment = assess(&features);

        Report {
            summary: build_summary(&features, &assessment),
            equity_curve: equity_curve(dataset),
            histogram: holding_histogram(dataset, thresholds),
            trades: trade_rows(dataset, thresholds),
            quality,
        }
    }
}

fn build_summary(features: &AggregateFeatures, assessment: &ToxicityAssessment) -> Summary {
    Summary {
        total_trades: features.total_trades,
        total_profit: features.total_profit,
        scalp_trades: features.scalp_trade_count,
        scalp_profit: features.scalp_profit,
        max_trades_per_minute: features.max_trades_per_minute,
        avg_holding_seconds: features.avg_holding_seconds,
        hft_suspect: assessment.hft_suspect,
        arbitrage_suspect: assessment.arbitrage_suspect,
        arbitrage_winrate: features.arbitrage_winrate,
        toxicity_score: assessment.score,
        risk_tier: assessment.risk_tier,
    }
}

/// Cumulative profit ordered by close time. The sort is stable, so trades
/// closing in the same instant keep their dataset order.
pub fn equity_curve(dataset: &[TradeRecord]) -> Vec<EquityPoint> {
    let mut ordered: Vec<&TradeRecord> = dataset.iter().collect();
    ordered.sort_by_key(|trade| trade.close_time);

    let mut cumulative = 0.0_f64;
    ordered
        .into_iter()
        .map(|trade| {
            cumulative += trade.profit;
            EquityPoint {
                close_time: trade.close_time,
                cumulative_profit: cumulative,
            }
        })
        .collect()
}

/// Holding-time distribution over threshold-aligned bands. Negative holding
/// times (clock anomalies) get their own band rather than being clamped.
pub fn holding_histogram(dataset: &[TradeRecord], thresholds: &Thresholds) -> Vec<HoldingBucket> {
    let edges = [
        thresholds.arbitrage_seconds,
        thresholds.hft_holding_seconds,
        thresholds.scalping_seconds,
        600.0,
        3600.0,
    ];

    let mut labels = vec!["negative".to_string()];
    let mut lower = 0.0;
    for edge in edges {
        labels.push(format!("{}-{}s", fmt_secs(lower), fmt_secs(edge)));
        lower = edge;
    }
    labels.push(format!("> {}s", fmt_secs(lower)));

    let mut counts = vec![0usize; labels.len()];
    for trade in dataset {
        let holding = trade.holding_seconds();
        let index = if holding < 0.0 {
            0
        } else {
            match edges.iter().position(|edge| holding <= *edge) {
                Some(i) => i + 1,
                None => labels.len() - 1,
            }
        };
        counts[index] += 1;
    }

    labels
        .into_iter()
        .zip(counts)
        .map(|(label, count)| HoldingBucket { label, count })
        .collect()
}

fn fmt_secs(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

pub fn trade_rows(dataset: &[TradeRecord], thresholds: &Thresholds) -> Vec<TradeRow> {
    dataset
        .iter()
        .map(|trade| TradeRow {
            ticket: trade.ticket.clone(),
            symbol: trade.symbol.clone(),
            volume: trade.volume,
            open_time: trade.open_time,
            close_time: trade.close_time,
            holding_seconds: trade.holding_seconds(),
            profit: trade.profit,
            scalping: trade.is_scalping(thresholds),
            hft_band: trade.is_hft_band(thresholds),
            arbitrage_short: trade.is_arbitrage_short(thresholds),
        })
        .collect()
}

/// Category view over the trade rows; rows are borrowed, never copied.
pub fn filter_trades(trades: &[TradeRow], filter: CategoryFilter) -> Vec<&TradeRow> {
    trades
        .iter()
        .filter(|row| match filter {
            CategoryFilter::All => true,
            CategoryFilter::Scalping => row.scalping,
            CategoryFilter::HftBand => row.hft_band,
            CategoryFilter::ArbitrageShort => row.arbitrage_short,
        })
        .collect()
}
