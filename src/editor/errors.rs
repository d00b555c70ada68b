//! # Editor Errors

use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("editing is disabled")]
    EditingDisabled,

    #[error("downloads are disabled")]
    DownloadDisabled,

    #[error("invalid document filename '{0}'")]
    InvalidFilename(String),

    #[error("invalid JSON: {0}")]
    Parse(String),

    #[error("schema validation failed: {0}")]
    SchemaViolation(String),

    #[error("cannot {action} while {state}")]
    InvalidTransition { action: &'static str, state: String },

    #[error("failed to serialize document: {0}")]
    Serialize(String),

    #[error("failed to write {path}: {reason}")]
    Io { path: String, reason: String },
}

impl EditorError {
    /// HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            EditorError::EditingDisabled | EditorError::DownloadDisabled => 403,
            EditorError::InvalidFilename(_) => 400,
            EditorError::Parse(_) | EditorError::SchemaViolation(_) => 422,
            EditorError::InvalidTransition { .. } => 409,
            EditorError::Serialize(_) | EditorError::Io { .. } => 500,
        }
    }

    /// Whether the document on disk is guaranteed untouched.
    pub fn nothing_written(&self) -> bool {
        !matches!(self, EditorError::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(EditorError::EditingDisabled.status_code(), 403);
        assert_eq!(EditorError::InvalidFilename("../x".into()).status_code(), 400);
        assert_eq!(EditorError::Parse("EOF".into()).status_code(), 422);
        assert_eq!(EditorError::SchemaViolation("x".into()).status_code(), 422);
    }

    #[test]
    fn test_display() {
        let err = EditorError::InvalidTransition {
            action: "save",
            state: "viewing".into(),
        };
        assert_eq!(err.to_string(), "cannot save while viewing");
    }
}
