//! Error types for transcript parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing a transcript file.
///
/// Malformed lines are not errors; only problems with the file itself are.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be read.
    #[error("failed to read file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSONL transcript.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

impl ParseError {
    /// Create an IO error.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }
}
