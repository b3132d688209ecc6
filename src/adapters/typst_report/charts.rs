//! Typst chart rendering for the report.

use crate::domain::report::{EquityPoint, HoldingBucket};

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 40.0;

/// Cumulative P&L line chart as Typst markup.
pub fn format_equity_chart(equity_curve: &[EquityPoint]) -> String {
    if equity_curve.is_empty() {
        return "No equity data available.".to_string();
    }

    let min_value = equity_curve
        .iter()
        .map(|p| p.cumulative_profit)
        .fold(f64::INFINITY, f64::min)
        .min(0.0);
    let max_value = equity_curve
        .iter()
        .map(|p| p.cumulative_profit)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(0.0);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_value - min_value;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if equity_curve.len() > 1 {
        plot_width / (equity_curve.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<String> = equity_curve
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (point.cumulative_profit - min_value) * scale_y;
            format!("({x:.1}pt, {y:.1}pt)")
        })
        .collect();

    format!(
        r#"#figure(
  box(
    width: {WIDTH:.0}pt,
    height: {HEIGHT:.0}pt,
    fill: white,
    {{
      place(line(start: ({PADDING:.0}pt, {PADDING:.0}pt), end: ({PADDING:.0}pt, {bottom:.0}pt)))
      place(line(start: ({PADDING:.0}pt, {bottom:.0}pt), end: ({right:.0}pt, {bottom:.0}pt)))
      place(path(
        fill: none,
        stroke: blue + 1pt,
        {points}
      ))
    }}
  ),
  caption: [Cumulative Profit/Loss]
)
"#,
        bottom = HEIGHT - PADDING,
        right = WIDTH - PADDING,
        points = points.join(", "),
    )
}

/// Holding-time distribution as a Typst bar chart over the threshold bands.
pub fn format_holding_histogram(buckets: &[HoldingBucket]) -> String {
    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    if max_count == 0 {
        return "No holding-time data available.".to_string();
    }

    let plot_height = HEIGHT - 2.0 * PADDING;
    let bar_slot = (WIDTH - 2.0 * PADDING) / buckets.len() as f64;
    let bar_width = bar_slot * 0.7;

    let mut bars = String::new();
    for (i, bucket) in buckets.iter().enumerate() {
        let bar_height = plot_height * bucket.count as f64 / max_count as f64;
        let x = PADDING + i as f64 * bar_slot + (bar_slot - bar_width) / 2.0;
        let y = HEIGHT - PADDING - bar_height;
        bars.push_str(&format!(
            "      place(dx: {x:.1}pt, dy: {y:.1}pt, rect(width: {bar_width:.1}pt, height: {bar_height:.1}pt, fill: blue))\n",
        ));
        bars.push_str(&format!(
            "      place(dx: {x:.1}pt, dy: {label_y:.1}pt, text(size: 6pt)[{label} ({count})])\n",
            label_y = HEIGHT - PADDING + 4.0,
            label = bucket.label,
            count = bucket.count,
        ));
    }

    format!(
        r#"#figure(
  box(
    width: {WIDTH:.0}pt,
    height: {HEIGHT:.0}pt,
    fill: white,
    {{
{bars}    }}
  ),
  caption: [Holding Time Distribution]
)
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(offset_secs: i64, cumulative: f64) -> EquityPoint {
        EquityPoint {
            close_time: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
                + chrono::Duration::seconds(offset_secs),
            cumulative_profit: cumulative,
        }
    }

    #[test]
    fn empty_equity_curve_has_message() {
        assert_eq!(format_equity_chart(&[]), "No equity data available.");
    }

    #[test]
    fn equity_chart_contains_figure_and_caption() {
        let chart = format_equity_chart(&[point(0, 1.0), point(60, 2.5), point(120, 1.5)]);
        assert!(chart.contains("#figure"));
        assert!(chart.contains("Cumulative Profit/Loss"));
        assert!(chart.contains("path"));
    }

    #[test]
    fn single_point_curve_renders() {
        let chart = format_equity_chart(&[point(0, 1.0)]);
        assert!(chart.contains("#figure"));
    }

    #[test]
    fn empty_histogram_has_message() {
        let buckets = vec![HoldingBucket {
            label: "0-10s".into(),
            count: 0,
        }];
        assert_eq!(
            format_holding_histogram(&buckets),
            "No holding-time data available."
        );
    }

    #[test]
    fn histogram_renders_one_bar_per_bucket() {
        let buckets = vec![
            HoldingBucket {
                label: "0-10s".into(),
                count: 3,
            },
            HoldingBucket {
                label: "10-60s".into(),
                count: 1,
            },
        ];
        let chart = format_holding_histogram(&buckets);
        assert!(chart.contains("Holding Time Distribution"));
        assert_eq!(chart.matches("rect(").count(), 2);
        assert!(chart.contains("0-10s (3)"));
    }
}
