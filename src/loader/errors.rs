//! # Loader Errors

use thiserror::Error;

pub type LoaderResult<T> = Result<T, LoaderError>;

/// Folder-level failures.
///
/// Per-file problems never become a `LoaderError`; they are recorded as
/// [`super::DocumentEntry::Failed`] so the rest of the batch survives.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoaderError {
    #[error("cannot list folder {path}: {reason}")]
    FolderUnreadable { path: String, reason: String },

    #[error("not a folder: {0}")]
    NotAFolder(String),
}
