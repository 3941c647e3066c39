//! Export of a project's latest session to a plaintext log.
//!
//! [`SessionExporter`] ties discovery, parsing and log writing together; the
//! [`log`] functions can also be used on their own.

pub mod log;
mod session;

pub use log::{default_output_path, format_log, format_message_timestamp, write_log, LogHeader};
pub use session::{ExportOutcome, ExportSummary, SessionExporter};

use std::path::PathBuf;
use thiserror::Error;

use crate::parser::ParseError;

/// Errors that can abort an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The log file could not be written.
    #[error("failed to write log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
