//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::app::AppState;
use crate::config::Layout;
use crate::entity::{display_title, EntityKind};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::loader::{load_folder, DocumentEntry};
use crate::observability::{log_event_with_fields, Event};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_stdout;

/// Outcome of checking one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Parsed, and passed its schema or had none
    Ok,
    /// Parsed, but failed its schema
    Invalid,
    /// Could not be read or parsed
    Error,
}

/// One line of `check` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckLine {
    pub section: &'static str,
    pub file: String,
    pub title: Option<String>,
    pub status: CheckStatus,
    pub message: String,
}

/// Entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            root,
            settings,
            host,
            port,
        } => serve(&root, settings, host, port),
        Command::Check { root } => check(&root),
    }
}

fn require_root(root: &Path) -> CliResult<Layout> {
    if !root.is_dir() {
        return Err(CliError::root_not_found(root.display()));
    }
    Ok(Layout::new(root))
}

/// Serve the explorer until the process is stopped.
pub fn serve(root: &Path, settings: Option<PathBuf>, host: String, port: u16) -> CliResult<()> {
    let layout = require_root(root)?;
    let settings_path = settings.unwrap_or_else(|| layout.default_settings_path());
    let state = Arc::new(AppState::bootstrap(layout, &settings_path));

    let http_config = HttpServerConfig {
        host,
        port,
        ..Default::default()
    };
    let server = HttpServer::with_config(http_config, state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Load and validate every document, printing one JSON line each.
pub fn check(root: &Path) -> CliResult<()> {
    let layout = require_root(root)?;
    let settings_path = layout.default_settings_path();
    let state = AppState::bootstrap(layout, &settings_path);

    let lines = check_report(&state);
    write_stdout(&lines)?;

    let count = |status: CheckStatus| lines.iter().filter(|l| l.status == status).count().to_string();
    log_event_with_fields(
        Event::CheckComplete,
        &[
            ("documents", lines.len().to_string().as_str()),
            ("invalid", count(CheckStatus::Invalid).as_str()),
            ("failed", count(CheckStatus::Error).as_str()),
        ],
    );
    Ok(())
}

/// Check results for every document in every section.
///
/// A folder that cannot be listed yields one error line with an empty
/// file name.
pub fn check_report(state: &AppState) -> Vec<CheckLine> {
    let validator = state.validator();
    let mut lines = Vec::new();

    for kind in EntityKind::ALL {
        let section = kind.section();
        let contents = match load_folder(&state.layout.folder(kind)) {
            Ok(contents) => contents,
            Err(e) => {
                lines.push(CheckLine {
                    section,
                    file: String::new(),
                    title: None,
                    status: CheckStatus::Error,
                    message: e.to_string(),
                });
                continue;
            }
        };

        for (file, entry) in contents {
            let line = match entry {
                DocumentEntry::Failed { error } => CheckLine {
                    section,
                    file,
                    title: None,
                    status: CheckStatus::Error,
                    message: error,
                },
                DocumentEntry::Document(doc) => {
                    let outcome = validator.validate_kind(&doc, kind);
                    CheckLine {
                        section,
                        file,
                        title: Some(display_title(kind, &doc)),
                        status: if outcome.valid {
                            CheckStatus::Ok
                        } else {
                            CheckStatus::Invalid
                        },
                        message: outcome.message,
                    }
                }
            };
            lines.push(line);
        }
    }

    lines
}
