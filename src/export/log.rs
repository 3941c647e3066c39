//! Plaintext log formatting.
//!
//! The layout is fixed: a five-line `#` header, then one section per message
//! separated by rules of `=` characters.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Timelike};

use super::ExportError;
use crate::parser::ExportedMessage;

/// First line of every log.
pub const LOG_TITLE: &str = "# Claude Code Session Log";

const SECTION_RULE_WIDTH: usize = 80;
const HEADING_RULE_WIDTH: usize = 40;

/// Prefix of generated log file names.
const LOG_FILE_PREFIX: &str = "session_log_";

/// Metadata written at the top of a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHeader {
    /// Project path as given on the command line.
    pub project: String,
    /// Filename of the exported transcript.
    pub session_file: String,
    /// Local time of the export.
    pub exported_at: NaiveDateTime,
}

impl LogHeader {
    pub fn new(
        project: impl Into<String>,
        session_file: impl Into<String>,
        exported_at: NaiveDateTime,
    ) -> Self {
        Self {
            project: project.into(),
            session_file: session_file.into(),
            exported_at,
        }
    }
}

/// Render the complete log.
pub fn format_log(header: &LogHeader, messages: &[ExportedMessage]) -> String {
    let section_rule = "=".repeat(SECTION_RULE_WIDTH);
    let heading_rule = "-".repeat(HEADING_RULE_WIDTH);

    let mut output = String::new();

    output.push_str(LOG_TITLE);
    output.push('\n');
    output.push_str(&format!("# Project: {}\n", header.project));
    output.push_str(&format!("# Session: {}\n", header.session_file));
    output.push_str(&format!(
        "# Exported: {}\n",
        format_exported_at(header.exported_at)
    ));
    output.push_str(&format!("# Messages: {}\n", messages.len()));
    output.push_str(&section_rule);
    output.push_str("\n\n");

    for message in messages {
        output.push_str(&format!(
            "[{}] {}:\n",
            format_message_timestamp(&message.timestamp),
            message.role
        ));
        output.push_str(&heading_rule);
        output.push('\n');
        output.push_str(&message.content);
        output.push_str("\n\n");
        output.push_str(&section_rule);
        output.push_str("\n\n");
    }

    output
}

/// Write the log to `path` and return the path written.
///
/// Parent directories are not created.
pub fn write_log(
    path: &Path,
    header: &LogHeader,
    messages: &[ExportedMessage],
) -> Result<PathBuf, ExportError> {
    fs::write(path, format_log(header, messages)).map_err(|e| ExportError::write(path, e))?;
    Ok(path.to_path_buf())
}

/// Default log location: `<project>/session_log_<YYYYMMDD>_<HHMMSS>.log`.
pub fn default_output_path(project: &str, now: NaiveDateTime) -> PathBuf {
    Path::new(project).join(format!(
        "{LOG_FILE_PREFIX}{}.log",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Shorten an ISO-8601 record timestamp to `YYYY-MM-DD HH:MM:SS`.
///
/// Takes the first 19 characters and swaps `T` for a space; anything that is
/// not ISO-8601 passes through truncated.
pub fn format_message_timestamp(timestamp: &str) -> String {
    timestamp
        .chars()
        .take(19)
        .map(|c| if c == 'T' { ' ' } else { c })
        .collect()
}

/// ISO-8601 local timestamp, with microseconds only when non-zero.
fn format_exported_at(exported_at: NaiveDateTime) -> String {
    if exported_at.nanosecond() / 1_000 == 0 {
        exported_at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        exported_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}
