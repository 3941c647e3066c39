//! End-to-end export of a project's active session.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::log::{default_output_path, write_log, LogHeader};
use super::ExportError;
use crate::clock::{Clock, SystemClock};
use crate::parser::{ClaudeParser, SessionParser};
use crate::scanner::{ClaudeScanner, SessionFile, SessionScanner};

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// The transcript that was exported.
    pub session: SessionFile,
    /// Where the log was written.
    pub output_path: PathBuf,
    /// Number of messages in the log.
    pub message_count: usize,
    /// Transcript lines that could not be parsed.
    pub skipped_lines: usize,
}

/// What an export run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// A log was written.
    Exported(ExportSummary),
    /// No eligible transcript exists for the project.
    NotFound { session_dir: PathBuf },
}

/// Locates, parses and writes out the latest session of a project.
pub struct SessionExporter {
    scanner: Box<dyn SessionScanner>,
    parser: Box<dyn SessionParser>,
    clock: Box<dyn Clock>,
    projects_root: PathBuf,
}

impl Default for SessionExporter {
    fn default() -> Self {
        let scanner = ClaudeScanner::new();
        let projects_root = scanner.default_root();
        Self::new(projects_root)
    }
}

impl SessionExporter {
    /// Create an exporter for Claude Code sessions under `projects_root`.
    pub fn new(projects_root: impl Into<PathBuf>) -> Self {
        Self {
            scanner: Box::new(ClaudeScanner::new()),
            parser: Box::new(ClaudeParser::new()),
            clock: Box::new(SystemClock),
            projects_root: projects_root.into(),
        }
    }

    /// Replace the time source used for the header and default file name.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn projects_root(&self) -> &Path {
        &self.projects_root
    }

    /// The directory searched for `project`'s transcripts.
    pub fn session_dir(&self, project: &str) -> PathBuf {
        self.scanner.session_dir(&self.projects_root, project)
    }

    /// Find the active transcript of `project`.
    ///
    /// A session directory that is missing or cannot be listed counts as
    /// holding no session.
    pub fn locate(&self, project: &str) -> Option<SessionFile> {
        let session_dir = self.session_dir(project);
        debug!(
            scanner = self.scanner.name(),
            dir = %session_dir.display(),
            "looking for latest session"
        );
        self.scanner.find_latest(&session_dir)
    }

    /// Parse `session` and write its log.
    ///
    /// Without an explicit `output`, the log goes into the project directory
    /// under a timestamped name.
    pub fn export_session(
        &self,
        project: &str,
        session: SessionFile,
        output: Option<&Path>,
    ) -> Result<ExportSummary, ExportError> {
        let transcript = self.parser.parse(&session.path)?;

        let exported_at = self.clock.now();
        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(project, exported_at),
        };

        let header = LogHeader::new(project, session.file_name.as_str(), exported_at);
        let output_path = write_log(&output_path, &header, &transcript.messages)?;

        info!(
            session = %session.id,
            messages = transcript.messages.len(),
            skipped = transcript.skipped_lines,
            output = %output_path.display(),
            "session exported"
        );

        Ok(ExportSummary {
            session,
            output_path,
            message_count: transcript.messages.len(),
            skipped_lines: transcript.skipped_lines,
        })
    }

    /// Locate and export in one step.
    pub fn export(&self, project: &str, output: Option<&Path>) -> Result<ExportOutcome, ExportError> {
        match self.locate(project) {
            Some(session) => Ok(ExportOutcome::Exported(
                self.export_session(project, session, output)?,
            )),
            None => Ok(ExportOutcome::NotFound {
                session_dir: self.session_dir(project),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::parser::ParseError;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn fixed_clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_session_dir_uses_projects_root() {
        let exporter = SessionExporter::new("/tmp/claude/projects");
        assert_eq!(
            exporter.session_dir("/work/my_app"),
            PathBuf::from("/tmp/claude/projects/-work-my-app")
        );
    }

    #[test]
    fn test_default_root() {
        let exporter = SessionExporter::default();
        assert!(exporter.projects_root().ends_with(".claude/projects"));
    }

    #[test]
    fn test_export_not_found() {
        let root = TempDir::new().unwrap();
        let exporter = SessionExporter::new(root.path());

        let outcome = exporter.export("/work/missing", None).unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::NotFound {
                session_dir: root.path().join("-work-missing")
            }
        );
    }

    #[test]
    fn test_locate_session_path_is_a_file() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("-work-app"), "not a directory").unwrap();
        let exporter = SessionExporter::new(root.path());

        assert!(exporter.locate("/work/app").is_none());
        assert_eq!(
            exporter.export("/work/app", None).unwrap(),
            ExportOutcome::NotFound {
                session_dir: root.path().join("-work-app")
            }
        );
    }

    #[test]
    fn test_export_session_rejects_non_transcript() {
        let project = TempDir::new().unwrap();
        let notes = project.path().join("notes.txt");
        fs::write(&notes, "plain text").unwrap();
        let session = SessionFile::new(notes.clone(), chrono::Utc::now());

        let result = SessionExporter::new(project.path()).export_session(
            project.path().to_str().unwrap(),
            session,
            None,
        );

        match result {
            Err(ExportError::Parse(ParseError::UnsupportedFormat { path })) => {
                assert_eq!(path, notes)
            }
            other => panic!("Expected UnsupportedFormat, got {other:?}"),
        }
        assert_eq!(fs::read_dir(project.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_export_to_default_path() {
        let root = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let project_str = project.path().to_str().unwrap();

        let session_dir = root.path().join(crate::scanner::session_dir_name(project_str));
        fs::create_dir_all(&session_dir).unwrap();
        fs::write(
            session_dir.join("s1.jsonl"),
            r#"{"type":"user","timestamp":"2024-01-15T10:00:00Z","message":{"role":"user","content":"hello"}}"#,
        )
        .unwrap();

        let exporter = SessionExporter::new(root.path()).with_clock(fixed_clock());
        let outcome = exporter.export(project_str, None).unwrap();

        let ExportOutcome::Exported(summary) = outcome else {
            panic!("Expected Exported outcome");
        };
        assert_eq!(
            summary.output_path,
            project.path().join("session_log_20240115_103000.log")
        );
        assert_eq!(summary.message_count, 1);
        assert_eq!(summary.session.file_name, "s1.jsonl");

        let log = fs::read_to_string(&summary.output_path).unwrap();
        assert!(log.contains("# Exported: 2024-01-15T10:30:00\n"));
        assert!(log.contains("[2024-01-15 10:00:00] USER:\n"));
    }
}
