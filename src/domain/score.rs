//! Composite toxicity scoring.
//!
//! Weighting: the scalping ratio is a continuous signal and carries the
//! largest share (40), HFT suspicion is a binary gate (30), and the
//! arbitrage win rate is continuous over its observed subset (30). The
//! natural maximum is exactly 100, so the score is asserted into range
//! rather than clamped.

use crate::domain::features::AggregateFeatures;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Classify a composite score into a tier.
    pub fn classify(score: f64) -> Self {
        if score >= 70.0 {
            RiskTier::High
        } else if score >= 40.0 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToxicityAssessment {
    /// Composite score in [0, 100].
    pub score: f64,
    pub risk_tier: RiskTier,
    pub hft_suspect: bool,
    pub arbitrage_suspect: bool,
}

/// Pure function of aggregate features. Downstream consumers depend on the
/// numeric score, so the formula must not drift.
pub fn assess(features: &AggregateFeatures) -> ToxicityAssessment {
    let scalp_ratio = if features.total_trades > 0 {
        features.scalp_trade_count as f64 / features.total_trades as f64
    } else {
        0.0
    };
    // A missing win rate (no arbitrage-short trades) contributes nothing.
    let winrate = features.arbitrage_winrate.unwrap_or(0.0);

    let score =
        scalp_ratio * 40.0 + if features.hft_suspect { 30.0 } else { 0.0 } + winrate * 30.0;
    debug_assert!((0.0..=100.0).contains(&score));

    ToxicityAssessment {
        score,
        risk_tier: RiskTier::classify(score),
        hft_suspect: features.hft_suspect,
        arbitrage_suspect: features.arbitrage_suspect,
    }
}
