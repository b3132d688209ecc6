//! Table formatting for the Typst report.

use crate::domain::normalize::DataQuality;
use crate::domain::report::{Summary, TradeRow};

pub fn render_summary_table(summary: &Summary) -> String {
    let winrate = match summary.arbitrage_winrate {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => "n/a".to_string(),
    };

    let mut out = String::from("#table(\n  columns: 2,\n  align: (left, right),\n");
    out.push_str(&format!(
        "  [*Total Trades*], [{}],\n",
        summary.total_trades
    ));
    out.push_str(&format!(
        "  [*Total P&L*], [{:.2}],\n",
        summary.total_profit
    ));
    out.push_str(&format!(
        "  [*Scalping Trades*], [{}],\n",
        summary.scalp_trades
    ));
    out.push_str(&format!(
        "  [*Scalping P&L*], [{:.2}],\n",
        summary.scalp_profit
    ));
    out.push_str(&format!(
        "  [*Avg Holding*], [{:.1}s],\n",
        summary.avg_holding_seconds
    ));
    out.push_str(&format!(
        "  [*Max Trades/Minute*], [{}],\n",
        summary.max_trades_per_minute
    ));
    out.push_str(&format!(
        "  [*HFT Suspect*], [{}],\n",
        yes_no(summary.hft_suspect)
    ));
    out.push_str(&format!(
        "  [*Arbitrage Suspect*], [{}],\n",
        yes_no(summary.arbitrage_suspect)
    ));
    out.push_str(&format!("  [*Arbitrage Win Rate*], [{winrate}],\n"));
    out.push_str(&format!(
        "  [*Toxicity Score*], [{:.1} / 100],\n",
        summary.toxicity_score
    ));
    out.push_str(&format!("  [*Risk Tier*], [{}],\n", summary.risk_tier));
    out.push_str(")\n");
    out
}

pub fn render_quality_table(quality: &DataQuality) -> String {
    let mut out = String::from("#table(\n  columns: 2,\n  align: (left, right),\n");
    out.push_str(&format!("  [*Rows Read*], [{}],\n", quality.rows_in));
    out.push_str(&format!(
        "  [*Rows Dropped (bad timestamps)*], [{}],\n",
        quality.rows_dropped
    ));
    out.push_str(&format!(
        "  [*Profit Values Defaulted*], [{}],\n",
        quality.profit_defaulted
    ));
    out.push_str(&format!(
        "  [*Volume Values Defaulted*], [{}],\n",
        quality.volume_defaulted
    ));
    out.push_str(")\n");
    out
}

pub fn render_trade_log(trades: &[TradeRow]) -> String {
    if trades.is_empty() {
        return "No trades in dataset.".to_string();
    }

    let mut out = String::from(
        "#table(\n  columns: 10,\n  align: (left, left, right, left, left, right, right, center, center, center),\n",
    );
    out.push_str(
        "  [*Ticket*], [*Symbol*], [*Volume*], [*Open Time*], [*Close Time*], [*Holding (s)*], [*Profit*], [*Scalp*], [*HFT*], [*Arb*],\n",
    );

    for row in trades {
        out.push_str(&format!(
            "  [{}], [{}], [{}], [{}], [{}], [{:.1}], [{:.2}], [{}], [{}], [{}],\n",
            row.ticket,
            row.symbol,
            row.volume,
            row.open_time.format("%Y.%m.%d %H:%M:%S"),
            row.close_time.format("%Y.%m.%d %H:%M:%S"),
            row.holding_seconds,
            row.profit,
            mark(row.scalping),
            mark(row.hft_band),
            mark(row.arbitrage_short),
        ));
    }

    out.push_str(")\n");
    out
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn mark(value: bool) -> &'static str {
    if value { "x" } else { "" }
}
