//! Typst report generation.
//!
//! Resolves `{{PLACEHOLDER}}` markers in a Typst template (the built-in
//! default or a custom file) against an analysis [`Report`] and writes the
//! final `.typ` file.

pub mod charts;
pub mod default_template;
pub mod tables;

use crate::domain::error::ToxscreenError;
use crate::domain::report::Report;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

/// Resolve all `{{PLACEHOLDER}}`s in the given template string and return
/// the final Typst markup.
pub fn resolve(template: &str, report: &Report) -> String {
    let mut output = template.to_string();

    output = output.replace(
        "{{SUMMARY_TABLE}}",
        &tables::render_summary_table(&report.summary),
    );
    output = output.replace(
        "{{DATA_QUALITY}}",
        &tables::render_quality_table(&report.quality),
    );

    let equity = charts::format_equity_chart(&report.equity_curve);
    output = output.replace("{{EQUITY_CURVE}}", &equity);

    let histogram = charts::format_holding_histogram(&report.histogram);
    output = output.replace("{{HOLDING_HISTOGRAM}}", &histogram);

    output = output.replace("{{TRADE_LOG}}", &tables::render_trade_log(&report.trades));

    output
}

/// Report adapter writing resolved Typst markup to disk. A custom template
/// can be supplied; otherwise the built-in default is used.
pub struct TypstReportAdapter {
    template: Option<String>,
}

impl TypstReportAdapter {
    pub fn new() -> Self {
        Self { template: None }
    }

    pub fn with_template(template: String) -> Self {
        Self {
            template: Some(template),
        }
    }
}

impl Default for TypstReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TypstReportAdapter {
    fn write(&self, report: &Report, output: &Path) -> Result<(), ToxscreenError> {
        let template = match self.template.as_deref() {
            Some(template) => template,
            None => default_template::template(),
        };
        fs::write(output, resolve(template, report))?;
        Ok(())
    }
}
