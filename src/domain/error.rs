//! Domain error types.
//!
//! File-level errors are fatal for the file being analyzed and surface as a
//! single human-readable message. Row-level anomalies (dropped or defaulted
//! rows) are absorbed into [`crate::domain::normalize::DataQuality`] counters
//! and never appear here.

/// Top-level error type for toxscreen.
#[derive(Debug, thiserror::Error)]
pub enum ToxscreenError {
    #[error("failed to read {file}: {reason}")]
    FileRead { file: String, reason: String },

    #[error("could not detect a trade table header: no row contains all required columns")]
    HeaderNotFound,

    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to write output: {reason}")]
    OutputWrite { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ToxscreenError> for std::process::ExitCode {
    fn from(err: &ToxscreenError) -> Self {
        let code: u8 = match err {
            ToxscreenError::Io(_) | ToxscreenError::OutputWrite { .. } => 1,
            ToxscreenError::ConfigParse { .. }
            | ToxscreenError::ConfigMissing { .. }
            | ToxscreenError::ConfigInvalid { .. } => 2,
            ToxscreenError::FileRead { .. } => 3,
            ToxscreenError::HeaderNotFound | ToxscreenError::MissingColumns { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
