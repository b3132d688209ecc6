//! Report writing port trait.

use crate::domain::error::ToxscreenError;
use crate::domain::report::Report;
use std::path::Path;

/// Port for writing analysis output. Implemented by the Typst report
/// adapter and the analyzed-trades CSV exporter.
pub trait ReportPort {
    fn write(&self, report: &Report, output: &Path) -> Result<(), ToxscreenError>;
}
