//! Raw table ingestion port trait.
//!
//! The file-reading edge hands the core a two-dimensional grid of loosely
//! typed cells; header detection and field mapping stay in the domain.

use crate::domain::cell::RawTable;
use crate::domain::error::ToxscreenError;
use std::path::Path;

pub trait TablePort {
    fn load_table(&self, path: &Path) -> Result<RawTable, ToxscreenError>;
}
