//! Transcript parser trait and the Claude Code implementation.
//!
//! A parser turns a transcript file into the ordered list of
//! [`ExportedMessage`]s that the log writer consumes.

mod claude;
mod error;
mod types;

pub use claude::ClaudeParser;
pub use error::ParseError;
pub use types::{
    Content, ContentBlock, ContentItem, ExportedMessage, RecordKind, RecordMessage, Transcript,
    TranscriptRecord, TOOL_RESULT_MARKER,
};

use std::path::Path;

/// A parser for transcript files.
///
/// Implementations never fail on malformed lines; they skip them. Errors are
/// reserved for files that cannot be read at all.
pub trait SessionParser: Send + Sync {
    /// Returns the name of this parser (e.g., "claude").
    fn name(&self) -> &'static str;

    /// Check if this parser can handle the given file.
    fn can_parse(&self, path: &Path) -> bool;

    /// Parse the transcript into exported messages.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the file cannot be opened or read, or is
    /// not in a supported format.
    fn parse(&self, path: &Path) -> Result<Transcript, ParseError>;
}
