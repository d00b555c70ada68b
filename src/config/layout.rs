use std::path::{Path, PathBuf};

use crate::entity::EntityKind;

/// Folder holding the JSON-Schema documents.
pub const SCHEMAS_FOLDER: &str = "schemas";

/// Default settings file name, relative to the root.
pub const SETTINGS_FILE: &str = "settings.json";

/// Fixed folder layout of a storyworld directory.
///
/// ```text
/// <root>/characters/*.json
/// <root>/scenes/*.json
/// <root>/locations/*.json
/// <root>/schemas/<label>.schema.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding documents of `kind`.
    pub fn folder(&self, kind: EntityKind) -> PathBuf {
        self.root.join(kind.section())
    }

    pub fn schemas_dir(&self) -> PathBuf {
        self.root.join(SCHEMAS_FOLDER)
    }

    pub fn default_settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }
}
