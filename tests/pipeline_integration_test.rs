//! End-to-end pipeline tests: raw CSV text through header detection,
//! normalization, feature computation, scoring, and report assembly.

mod common;

use common::*;
use toxscreen::domain::error::ToxscreenError;
use toxscreen::domain::features::AggregateFeatures;
use toxscreen::domain::locate::locate_table;
use toxscreen::domain::normalize::{normalize_table, DataQuality};
use toxscreen::domain::report::Report;
use toxscreen::domain::score::{assess, RiskTier};
use toxscreen::domain::thresholds::Thresholds;
use toxscreen::ports::table_port::TablePort;

/// A realistic MT5-style export: report metadata above the real header.
const MT5_EXPORT: &str = "\
Trade History Report,,,,,
Account: 123456,,,,,
Name: Example Trader,,,,,
Ticket,Open Time,Close Time,Symbol,Volume,Profit
101,2024.01.15 10:00:00,2024.01.15 10:00:05,EURUSD,0.10,1.20
102,2024.01.15 10:00:10,2024.01.15 10:00:14,EURUSD,0.10,0.80
103,2024.01.15 10:00:20,2024.01.15 10:00:28,EURUSD,0.10,1.10
104,2024.01.15 10:00:30,2024.01.15 10:00:39,EURUSD,0.10,0.90
105,2024.01.15 10:00:40,2024.01.15 10:00:47,EURUSD,0.10,-0.40
106,2024.01.15 10:01:00,2024.01.15 10:01:06,GBPUSD,0.20,1.50
";

mod header_detection {
    use super::*;

    #[test]
    fn detects_header_below_metadata_rows() {
        let file = write_temp_csv(MT5_EXPORT);
        let (located, normalized) = toxscreen::cli::ingest(file.path()).unwrap();

        assert_eq!(located.header_row, 3);
        assert_eq!(normalized.dataset.len(), 6);
    }

    #[test]
    fn header_in_row_zero_is_the_fast_path() {
        let csv = "Ticket,Open Time,Close Time,Symbol,Volume,Profit\n\
                   101,2024.01.15 10:00:00,2024.01.15 10:05:00,EURUSD,0.1,1.0\n";
        let file = write_temp_csv(csv);
        let (located, normalized) = toxscreen::cli::ingest(file.path()).unwrap();

        assert_eq!(located.header_row, 0);
        assert_eq!(normalized.dataset.len(), 1);
    }

    #[test]
    fn file_without_header_is_fatal() {
        let file = write_temp_csv("a,b,c\nd,e,f\n");
        let err = toxscreen::cli::ingest(file.path()).unwrap_err();
        assert!(matches!(err, ToxscreenError::HeaderNotFound));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = toxscreen::cli::ingest(std::path::Path::new("/nonexistent/deals.csv"))
            .unwrap_err();
        assert!(matches!(err, ToxscreenError::FileRead { .. }));
    }

    #[test]
    fn mock_port_failure_surfaces_as_read_error() {
        let port = MockTablePort::failing("disk unplugged");
        let err = port
            .load_table(std::path::Path::new("deals.csv"))
            .unwrap_err();
        assert!(matches!(err, ToxscreenError::FileRead { .. }));
    }
}

mod normalization {
    use super::*;

    #[test]
    fn bad_timestamps_shrink_the_dataset() {
        let table = vec![
            standard_header(),
            trade_row("1", "garbage", "2024.01.15 10:00:30", "EURUSD", "0.1", "1.0"),
            trade_row("2", "2024.01.15 10:00:00", "2024.01.15 10:00:30", "EURUSD", "0.1", "1.0"),
            trade_row("3", "2024.01.15 10:00:00", "garbage", "EURUSD", "0.1", "1.0"),
        ];
        let located = locate_table(table).unwrap();
        let normalized = normalize_table(&located).unwrap();

        assert_eq!(normalized.dataset.len(), 1);
        assert_eq!(normalized.quality.rows_dropped, 2);
    }

    #[test]
    fn bad_numerics_keep_the_row_with_zero() {
        let table = vec![
            standard_header(),
            trade_row("1", "2024.01.15 10:00:00", "2024.01.15 10:00:30", "EURUSD", "??", "??"),
        ];
        let located = locate_table(table).unwrap();
        let normalized = normalize_table(&located).unwrap();

        assert_eq!(normalized.dataset.len(), 1);
        assert_eq!(normalized.dataset[0].profit, 0.0);
        assert_eq!(normalized.dataset[0].volume, 0.0);
    }
}

mod scenarios {
    use super::*;

    fn features_for(rows: Vec<Vec<toxscreen::domain::cell::Cell>>) -> AggregateFeatures {
        let mut table = vec![standard_header()];
        table.extend(rows);
        let located = locate_table(table).unwrap();
        let normalized = normalize_table(&located).unwrap();
        AggregateFeatures::compute(&normalized.dataset, &Thresholds::default())
    }

    #[test]
    fn basic_scalping_contributes_forty() {
        // Ten 30-second trades, spread out over minutes: pure scalping.
        let rows: Vec<_> = (0..10)
            .map(|i| {
                let open = format!("2024.01.15 10:{:02}:00", i * 5);
                let close = format!("2024.01.15 10:{:02}:30", i * 5);
                let profit = if i < 8 { "1" } else { "-1" };
                trade_row(&format!("{i}"), &open, &close, "EURUSD", "0.1", profit)
            })
            .collect();

        let features = features_for(rows);
        assert_eq!(features.scalp_trade_count, 10);
        assert_eq!(features.total_trades, 10);

        let assessment = assess(&features);
        assert!((assessment.score - 40.0).abs() < 1e-9);
        assert_eq!(assessment.risk_tier, RiskTier::Medium);
    }

    #[test]
    fn hft_gate_needs_both_conditions() {
        // Average holding below the band, but no minute has five trades.
        let rows: Vec<_> = (0..6)
            .map(|i| {
                let open = format!("2024.01.15 10:{:02}:00", i * 2);
                let close = format!("2024.01.15 10:{:02}:50", i * 2);
                trade_row(&format!("{i}"), &open, &close, "EURUSD", "0.1", "1")
            })
            .collect();

        let features = features_for(rows);
        assert!(features.avg_holding_seconds < 60.0);
        assert!(features.max_trades_per_minute < 5);
        assert!(!features.hft_suspect);
    }

    #[test]
    fn arbitrage_winrate_threshold_is_inclusive() {
        // Five ultra-short trades, four profitable: exactly 0.8.
        let rows: Vec<_> = (0..5)
            .map(|i| {
                let open = format!("2024.01.15 10:{:02}:00", i * 5);
                let close = format!("2024.01.15 10:{:02}:05", i * 5);
                let profit = if i < 4 { "2.0" } else { "-2.0" };
                trade_row(&format!("{i}"), &open, &close, "EURUSD", "0.1", profit)
            })
            .collect();

        let features = features_for(rows);
        assert_eq!(features.arbitrage_short_count, 5);
        assert_eq!(features.arbitrage_winrate, Some(0.8));
        assert!(features.arbitrage_suspect);
    }

    #[test]
    fn all_rows_unparseable_yields_empty_low_risk_report() {
        let table = vec![
            standard_header(),
            trade_row("1", "bad", "bad", "EURUSD", "0.1", "1.0"),
            trade_row("2", "bad", "bad", "EURUSD", "0.1", "1.0"),
        ];
        let located = locate_table(table).unwrap();
        let normalized = normalize_table(&located).unwrap();
        assert!(normalized.dataset.is_empty());

        let report = Report::build(
            &normalized.dataset,
            normalized.quality,
            &Thresholds::default(),
        );
        assert_eq!(report.summary.total_trades, 0);
        assert_eq!(report.summary.toxicity_score, 0.0);
        assert_eq!(report.summary.risk_tier, RiskTier::Low);
        assert!(report.equity_curve.is_empty());
        assert_eq!(report.quality.rows_dropped, 2);
    }

    #[test]
    fn dense_ultra_short_burst_scores_high() {
        // Six trades opened within one minute, each held five seconds and
        // profitable: scalping, HFT, and arbitrage signals all fire.
        let rows: Vec<_> = (0..6)
            .map(|i| {
                let open = format!("2024.01.15 10:00:{:02}", i * 8);
                let close = format!("2024.01.15 10:00:{:02}", i * 8 + 5);
                trade_row(&format!("{i}"), &open, &close, "EURUSD", "0.1", "1")
            })
            .collect();

        let features = features_for(rows);
        assert!(features.hft_suspect);
        assert_eq!(features.arbitrage_winrate, Some(1.0));

        let assessment = assess(&features);
        assert!((assessment.score - 100.0).abs() < 1e-9);
        assert_eq!(assessment.risk_tier, RiskTier::High);
    }
}

mod report_outputs {
    use super::*;
    use toxscreen::adapters::csv_export_adapter::CsvExportAdapter;
    use toxscreen::adapters::typst_report::{default_template, resolve};

    fn build_report() -> Report {
        let file = write_temp_csv(MT5_EXPORT);
        let (_, normalized) = toxscreen::cli::ingest(file.path()).unwrap();
        Report::build(
            &normalized.dataset,
            normalized.quality,
            &Thresholds::default(),
        )
    }

    #[test]
    fn equity_curve_is_sorted_and_cumulative() {
        let report = build_report();
        assert_eq!(report.equity_curve.len(), 6);
        for pair in report.equity_curve.windows(2) {
            assert!(pair[0].close_time <= pair[1].close_time);
        }
        let last = report.equity_curve.last().unwrap();
        assert!((last.cumulative_profit - 5.1).abs() < 1e-9);
    }

    #[test]
    fn typst_report_resolves_cleanly() {
        let report = build_report();
        let output = resolve(default_template::template(), &report);
        assert!(!output.contains("{{"));
        assert!(output.contains("Toxic Trading Analysis"));
    }

    #[test]
    fn export_round_trips_through_the_pipeline() {
        // The analyzed-trades CSV carries the canonical header, so it can be
        // re-ingested as a valid export.
        let report = build_report();
        let exported = CsvExportAdapter::render(&report.trades).unwrap();

        let file = write_temp_csv(&exported);
        let (located, normalized) = toxscreen::cli::ingest(file.path()).unwrap();

        assert_eq!(located.header_row, 0);
        assert_eq!(normalized.dataset.len(), report.trades.len());
        assert_eq!(normalized.quality.rows_dropped, 0);
    }

    #[test]
    fn empty_dataset_report_has_placeholder_messages() {
        let report = Report::build(&[], DataQuality::default(), &Thresholds::default());
        let output = resolve(default_template::template(), &report);
        assert!(output.contains("No equity data available."));
        assert!(output.contains("No trades in dataset."));
    }
}
