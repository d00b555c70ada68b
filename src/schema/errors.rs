//! Schema error types
//!
//! A schema problem only ever disables validation for its kind; startup
//! continues and the error is logged.

use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("failed to read schema file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("schema file {path} is not valid JSON: {reason}")]
    Malformed { path: String, reason: String },

    #[error("schema '{label}' is not a usable JSON-Schema: {reason}")]
    Uncompilable { label: String, reason: String },

    #[error("failed to list schema folder {path}: {reason}")]
    FolderUnreadable { path: String, reason: String },
}

impl SchemaError {
    /// Path or label the error is about.
    pub fn subject(&self) -> &str {
        match self {
            SchemaError::Unreadable { path, .. }
            | SchemaError::Malformed { path, .. }
            | SchemaError::FolderUnreadable { path, .. } => path,
            SchemaError::Uncompilable { label, .. } => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_subject() {
        let err = SchemaError::Uncompilable {
            label: "region".into(),
            reason: "type must be a string or array".into(),
        };
        assert_eq!(err.subject(), "region");
        assert!(err.to_string().contains("region"));
    }
}
