//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_export_adapter::CsvExportAdapter;
use crate::adapters::csv_table_adapter::CsvTableAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::typst_report::TypstReportAdapter;
use crate::domain::error::ToxscreenError;
use crate::domain::locate::{locate_table, LocatedTable};
use crate::domain::normalize::{map_columns, normalize_table, Normalized};
use crate::domain::report::Report;
use crate::domain::thresholds::Thresholds;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::table_port::TablePort;

#[derive(Parser, Debug)]
#[command(name = "toxscreen", about = "MT5 trading-history toxicity screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a trading-history export
    Analyze {
        /// Path to the MT5 deals / trading-history CSV export
        file: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write a Typst report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the analyzed trades as CSV to this path
        #[arg(short, long)]
        export: Option<PathBuf>,
        /// Print the summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Re-export the analyzed trades as CSV
    Export {
        /// Path to the MT5 deals / trading-history CSV export
        file: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show header detection and data-quality diagnostics for a file
    Inspect {
        /// Path to the MT5 deals / trading-history CSV export
        file: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            file,
            config,
            output,
            export,
            json,
        } => run_analyze(&file, config.as_ref(), output.as_ref(), export.as_ref(), json),
        Command::Export {
            file,
            output,
            config,
        } => run_export(&file, &output, config.as_ref()),
        Command::Inspect { file, config } => run_inspect(&file, config.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ToxscreenError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Resolve thresholds: config `[thresholds]` section when a config file is
/// given, built-in defaults otherwise.
pub fn build_thresholds(
    config: Option<&FileConfigAdapter>,
) -> Result<Thresholds, ToxscreenError> {
    match config {
        Some(adapter) => Thresholds::from_config(adapter),
        None => Ok(Thresholds::default()),
    }
}

/// Shared ingestion pipeline: read the file, locate the trade table, and
/// normalize it into the canonical dataset.
pub fn ingest(file: &Path) -> Result<(LocatedTable, Normalized), ToxscreenError> {
    let raw = CsvTableAdapter::new().load_table(file)?;
    let located = locate_table(raw)?;
    let normalized = normalize_table(&located)?;
    Ok((located, normalized))
}

fn load_config_and_thresholds(
    config_path: Option<&PathBuf>,
) -> Result<(Option<FileConfigAdapter>, Thresholds), ExitCode> {
    let config = match config_path {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let thresholds = match build_thresholds(config.as_ref()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(ExitCode::from(&e));
        }
    };
    Ok((config, thresholds))
}

fn run_analyze(
    file: &Path,
    config_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
    export_path: Option<&PathBuf>,
    json: bool,
) -> ExitCode {
    // Stage 1: Config and thresholds
    let (config, thresholds) = match load_config_and_thresholds(config_path) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    // Stage 2: Ingest and normalize
    eprintln!("Reading {}", file.display());
    let (located, normalized) = match ingest(file) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    eprintln!(
        "Header detected at row {}, {} trades normalized ({} rows dropped)",
        located.header_row,
        normalized.dataset.len(),
        normalized.quality.rows_dropped,
    );

    // Stage 3: Features, score, report assembly
    let report = Report::build(&normalized.dataset, normalized.quality, &thresholds);
    let summary = &report.summary;

    // Stage 4: Console summary
    eprintln!("\n=== Toxicity Summary ===");
    eprintln!("Total Trades:       {}", summary.total_trades);
    eprintln!("Total P&L:          {:.2}", summary.total_profit);
    eprintln!(
        "Scalping Trades:    {} ({:.2} P&L)",
        summary.scalp_trades, summary.scalp_profit
    );
    eprintln!("Avg Holding:        {:.1}s", summary.avg_holding_seconds);
    eprintln!("Max Trades/Minute:  {}", summary.max_trades_per_minute);
    eprintln!(
        "HFT Suspect:        {}",
        if summary.hft_suspect { "yes" } else { "no" }
    );
    match summary.arbitrage_winrate {
        Some(rate) => eprintln!("Arbitrage Win Rate: {:.1}%", rate * 100.0),
        None => eprintln!("Arbitrage Win Rate: n/a (no ultra-short trades)"),
    }
    eprintln!("Toxicity Score:     {:.1} / 100", summary.toxicity_score);
    eprintln!("Risk Tier:          {}", summary.risk_tier);

    // Stage 5: Machine-readable summary
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: failed to serialize summary: {e}");
                return ExitCode::from(1);
            }
        }
    }

    // Stage 6: Typst report
    if let Some(output) = output_path {
        let adapter = match report_adapter(config.as_ref()) {
            Ok(a) => a,
            Err(code) => return code,
        };
        if let Err(e) = adapter.write(&report, output) {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
        eprintln!("\nReport written to: {}", output.display());
    }

    // Stage 7: Analyzed-trades export
    if let Some(export) = export_path {
        if let Err(e) = CsvExportAdapter::new().write(&report, export) {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
        eprintln!("Analyzed trades written to: {}", export.display());
    }

    ExitCode::SUCCESS
}

/// Build the Typst adapter, honoring `[report] template_path` when set.
fn report_adapter(config: Option<&FileConfigAdapter>) -> Result<TypstReportAdapter, ExitCode> {
    let template_path = config.and_then(|c| c.get_string("report", "template_path"));
    match template_path {
        Some(path) => match fs::read_to_string(&path) {
            Ok(content) => Ok(TypstReportAdapter::with_template(content)),
            Err(e) => {
                eprintln!("error: failed to read template {path}: {e}");
                Err(ExitCode::from(1))
            }
        },
        None => Ok(TypstReportAdapter::new()),
    }
}

fn run_export(file: &Path, output: &Path, config_path: Option<&PathBuf>) -> ExitCode {
    let (_, thresholds) = match load_config_and_thresholds(config_path) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    eprintln!("Reading {}", file.display());
    let (_, normalized) = match ingest(file) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    let report = Report::build(&normalized.dataset, normalized.quality, &thresholds);
    if let Err(e) = CsvExportAdapter::new().write(&report, output) {
        eprintln!("error: {e}");
        return ExitCode::from(&e);
    }

    eprintln!(
        "{} analyzed trades written to: {}",
        report.trades.len(),
        output.display()
    );
    ExitCode::SUCCESS
}

fn run_inspect(file: &Path, config_path: Option<&PathBuf>) -> ExitCode {
    let (_, _thresholds) = match load_config_and_thresholds(config_path) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    eprintln!("Reading {}", file.display());
    let (located, normalized) = match ingest(file) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    println!("header row:        {}", located.header_row);
    println!("body rows:         {}", located.body.len());

    match map_columns(&located.labels) {
        Ok(columns) => {
            println!("column mapping:");
            println!("  Ticket     -> column {}", columns.ticket);
            println!("  Open Time  -> column {}", columns.open_time);
            println!("  Close Time -> column {}", columns.close_time);
            println!("  Symbol     -> column {}", columns.symbol);
            println!("  Volume     -> column {}", columns.volume);
            println!("  Profit     -> column {}", columns.profit);
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    }

    let quality = &normalized.quality;
    println!("rows read:         {}", quality.rows_in);
    println!("trades normalized: {}", normalized.dataset.len());
    println!("rows dropped:      {}", quality.rows_dropped);
    println!("profit defaulted:  {}", quality.profit_defaulted);
    println!("volume defaulted:  {}", quality.volume_defaulted);

    ExitCode::SUCCESS
}
