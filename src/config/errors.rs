//! # Configuration Errors

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reasons a settings file is not used.
///
/// None of these are fatal: callers fall back to defaults and warn.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("settings file not found: {0}")]
    NotFound(String),

    #[error("failed to read settings file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("malformed settings file {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("invalid setting '{key}': {reason}")]
    Invalid { key: String, reason: String },
}
