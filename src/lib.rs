//! Export Claude Code sessions to readable plaintext logs.
//!
//! The pipeline is: [`scanner`] finds the newest transcript of a project,
//! [`parser`] turns its JSONL records into messages, and [`export`] writes
//! them out as a `.log` file.

pub mod clock;
pub mod config;
pub mod export;
pub mod logging;
pub mod parser;
pub mod scanner;
