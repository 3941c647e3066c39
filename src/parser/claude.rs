//! Claude Code JSONL transcript parser.
//!
//! Parses transcript files stored in `~/.claude/projects/<project>/`.
//! Each line is a JSON object representing an event in the session; only
//! `user` and `assistant` events become exported messages.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};

use super::{ExportedMessage, ParseError, SessionParser, Transcript, TranscriptRecord};

/// Parser for Claude Code JSONL transcript files.
#[derive(Debug, Default)]
pub struct ClaudeParser;

impl ClaudeParser {
    /// Create a new ClaudeParser.
    pub fn new() -> Self {
        Self
    }
}

impl SessionParser for ClaudeParser {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == "jsonl")
            .unwrap_or(false)
    }

    fn parse(&self, path: &Path) -> Result<Transcript, ParseError> {
        if !self.can_parse(path) {
            return Err(ParseError::unsupported_format(path));
        }

        let file = File::open(path).map_err(|e| ParseError::io_error(path, e))?;
        let reader = BufReader::new(file);

        let mut transcript = Transcript::default();

        // Split on raw bytes so a line with invalid UTF-8 is skipped like any
        // other malformed line instead of aborting the read.
        for (line_num, line_result) in reader.split(b'\n').enumerate() {
            let line = line_result.map_err(|e| ParseError::io_error(path, e))?;

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let Some(record) = parse_record(&line) else {
                debug!(line = line_num + 1, "skipping malformed transcript line");
                transcript.skipped_lines += 1;
                continue;
            };

            if let Some(message) = export_record(record) {
                transcript.messages.push(message);
            } else {
                trace!(line = line_num + 1, "record produced no message");
            }
        }

        debug!(
            path = %path.display(),
            messages = transcript.messages.len(),
            skipped = transcript.skipped_lines,
            "parsed transcript"
        );

        Ok(transcript)
    }
}

/// Parse one line, or `None` if it is not a record.
fn parse_record(line: &[u8]) -> Option<TranscriptRecord> {
    serde_json::from_slice(line).ok()
}

/// Turn a record into an exported message.
///
/// Non-turn records and turns whose text is blank yield `None`.
fn export_record(record: TranscriptRecord) -> Option<ExportedMessage> {
    if !record.kind.is_turn() {
        return None;
    }

    let message = record.message.unwrap_or_default();
    let role = message
        .role
        .unwrap_or_else(|| record.kind.as_str().to_string());
    let text = message.content.extract_text();

    if text.trim().is_empty() {
        return None;
    }

    Some(ExportedMessage::new(
        record.timestamp.unwrap_or_default(),
        role.to_uppercase(),
        text,
    ))
}
