//! Session discovery for a project.
//!
//! Maps a project path to the directory where its transcripts live and picks
//! the most recently modified transcript in it. Transcript contents are not
//! read here; that is the parser's job.

mod claude;

pub use claude::{session_dir_name, ClaudeScanner, AGENT_PREFIX};

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A transcript file selected for export.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionFile {
    /// Session identifier (the filename without extension).
    pub id: String,
    /// Full path to the transcript file.
    pub path: PathBuf,
    /// Filename including extension, as shown in the log header.
    pub file_name: String,
    /// When the file was last modified.
    pub updated_at: DateTime<Utc>,
}

impl SessionFile {
    /// Create a SessionFile, deriving the id and filename from `path`.
    pub fn new(path: PathBuf, updated_at: DateTime<Utc>) -> Self {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string());
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            id,
            path,
            file_name,
            updated_at,
        }
    }
}

/// Problems met during session discovery.
///
/// Discovery never fails outright; these are logged and the affected
/// directory or entry is treated as holding no session.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The session directory could not be listed.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error getting file metadata.
    #[error("failed to get metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create a directory read error.
    pub fn directory_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    /// Create a metadata error.
    pub fn metadata(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Metadata {
            path: path.into(),
            source,
        }
    }
}

/// A scanner that locates the active transcript of a project.
///
/// # Example
///
/// ```ignore
/// use session_log::scanner::{ClaudeScanner, SessionScanner};
///
/// let scanner = ClaudeScanner::new();
/// let dir = scanner.session_dir(&scanner.default_root(), "/home/user/api_server");
/// match scanner.find_latest(&dir) {
///     Some(session) => println!("latest: {}", session.file_name),
///     None => println!("nothing in {}", dir.display()),
/// }
/// ```
pub trait SessionScanner: Send + Sync {
    /// Returns the name of this scanner (e.g., "claude").
    fn name(&self) -> &'static str;

    /// The directory holding one subdirectory per project.
    fn default_root(&self) -> PathBuf;

    /// The directory where transcripts for `project` are stored under `root`.
    ///
    /// Pure path computation; the directory may not exist.
    fn session_dir(&self, root: &Path, project: &str) -> PathBuf;

    /// Find the most recently modified eligible transcript in `session_dir`.
    ///
    /// Returns `None` when the path is not a listable directory or holds no
    /// eligible transcript.
    fn find_latest(&self, session_dir: &Path) -> Option<SessionFile>;
}
