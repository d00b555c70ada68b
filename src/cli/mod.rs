//! CLI module for the storyworld explorer
//!
//! Provides command-line interface for:
//! - serve: Load settings and schemas, then serve the explorer over HTTP
//! - check: Validate every document and print one JSON line per document

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, check_report, run, run_command, serve, CheckLine, CheckStatus};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_lines, write_stdout};
