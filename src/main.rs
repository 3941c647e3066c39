use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use session_log::config::Config;
use session_log::export::SessionExporter;
use session_log::logging::init_logging;

#[derive(Parser)]
#[command(name = "session-log")]
#[command(version)]
#[command(about = "Export the latest Claude Code session of a project to a .log file")]
#[command(
    long_about = "Finds the most recently modified Claude Code transcript for PROJECT under ~/.claude/projects and writes its user and assistant turns to a readable plaintext log."
)]
struct Cli {
    /// Path to the project directory
    project: String,

    /// Output file (default: PROJECT/session_log_<YYYYMMDD>_<HHMMSS>.log)
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {e}; using default configuration");
        Config::default()
    });
    let _log_guard = init_logging(&config.log_config());

    let exporter = match config.projects_root() {
        Some(root) => SessionExporter::new(root),
        None => SessionExporter::default(),
    };

    let Some(session) = exporter.locate(&cli.project) else {
        println!("No session found for: {}", cli.project);
        println!("Looked in: {}", exporter.session_dir(&cli.project).display());
        return Ok(());
    };

    println!("Found session: {}", session.file_name);

    let summary = exporter
        .export_session(&cli.project, session, cli.output.as_deref())
        .with_context(|| format!("Failed to export session for {}", cli.project))?;

    println!(
        "Exported {} messages to: {}",
        summary.message_count,
        summary.output_path.display()
    );

    Ok(())
}
