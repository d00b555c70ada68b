//! CLI argument definitions using clap
//!
//! Commands:
//! - storyworld serve [--root <dir>] [--settings <file>] [--host <h>] [--port <p>]
//! - storyworld check [--root <dir>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storyworld Explorer - browse, validate, and edit a storyworld's JSON documents
#[derive(Parser, Debug)]
#[command(name = "storyworld")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Serve the explorer over HTTP
    Serve {
        /// Storyworld root holding characters/, scenes/, locations/, schemas/
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Settings file (default: <root>/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 8501)]
        port: u16,
    },

    /// Load and validate every document, one JSON line per document
    Check {
        /// Storyworld root holding characters/, scenes/, locations/, schemas/
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
