//! Claude Code session scanner.
//!
//! Claude Code keeps transcripts in `~/.claude/projects/<encoded project>/`,
//! one `*.jsonl` file per session. Subagent transcripts live alongside them
//! as `agent-*.jsonl` and are never picked as the active session.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use super::{ScanError, SessionFile, SessionScanner};

/// Filename prefix of subagent transcripts.
pub const AGENT_PREFIX: &str = "agent-";

const TRANSCRIPT_EXTENSION: &str = "jsonl";

/// Scanner for Claude Code sessions stored in `~/.claude/projects/`.
#[derive(Debug, Default)]
pub struct ClaudeScanner;

impl ClaudeScanner {
    /// Create a new ClaudeScanner.
    pub fn new() -> Self {
        Self
    }
}

impl SessionScanner for ClaudeScanner {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn default_root(&self) -> PathBuf {
        let claude_dir = match dirs::home_dir() {
            Some(home) => home.join(".claude"),
            None => PathBuf::from(".claude"),
        };
        claude_dir.join("projects")
    }

    fn session_dir(&self, root: &Path, project: &str) -> PathBuf {
        root.join(session_dir_name(project))
    }

    fn find_latest(&self, session_dir: &Path) -> Option<SessionFile> {
        if !session_dir.is_dir() {
            debug!(dir = %session_dir.display(), "session directory does not exist");
            return None;
        }

        let entries = match fs::read_dir(session_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %ScanError::directory_read(session_dir, e), "no session found");
                return None;
            }
        };

        // Ordered by (mtime, filename) so equal mtimes resolve to the
        // lexicographically greatest name.
        let mut latest: Option<(SystemTime, String, PathBuf)> = None;

        for entry_result in entries {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(TRANSCRIPT_EXTENSION) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.starts_with(AGENT_PREFIX) {
                continue;
            }

            let modified = match fs::metadata(&path).and_then(|meta| {
                if meta.is_file() {
                    meta.modified().map(Some)
                } else {
                    Ok(None)
                }
            }) {
                Ok(Some(modified)) => modified,
                Ok(None) => continue,
                Err(e) => {
                    warn!(error = %ScanError::metadata(&path, e), "skipping transcript");
                    continue;
                }
            };

            let candidate = (modified, file_name, path);
            if latest.as_ref().map_or(true, |best| {
                (&candidate.0, &candidate.1) > (&best.0, &best.1)
            }) {
                latest = Some(candidate);
            }
        }

        latest.map(|(modified, _, path)| SessionFile::new(path, modified.into()))
    }
}

/// Encode a project path the way Claude Code names its project directories.
///
/// Every `/` and `_` becomes `-`, and the result always starts with `-`.
/// The mapping is lossy: `/a_b` and `/a/b` share a directory.
pub fn session_dir_name(project: &str) -> String {
    let encoded: String = project
        .chars()
        .map(|c| match c {
            '/' | '_' => '-',
            other => other,
        })
        .collect();

    if encoded.starts_with('-') {
        encoded
    } else {
        format!("-{encoded}")
    }
}
