//! Schema registry, loaded once at startup
//!
//! Schemas are stored at `<root>/schemas/<label>.schema.json`, one file per
//! entity kind label. A missing file means "no schema" for that label; a
//! broken file is logged and treated the same way.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use crate::entity::EntityKind;
use crate::observability::{log_event_with_fields, Event};

/// File name suffix identifying a schema file.
pub const SCHEMA_SUFFIX: &str = ".schema.json";

/// A compiled schema and the document it came from.
pub struct RegisteredSchema {
    source: Value,
    validator: Validator,
}

impl RegisteredSchema {
    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

/// Read-only set of compiled schemas keyed by label.
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, RegisteredSchema>,
}

impl SchemaRegistry {
    /// A registry with no schemas; everything validates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads every `*.schema.json` in `schema_dir`.
    ///
    /// Never fails. Problems come back alongside the registry so the caller
    /// can surface them; each one is also logged.
    pub fn load_dir(schema_dir: &Path) -> (Self, Vec<SchemaError>) {
        let mut registry = Self::empty();
        let mut problems = Vec::new();

        match schema_files(schema_dir) {
            Ok(files) => {
                for (label, path) in files {
                    if let Err(e) = registry.load_file(&label, &path) {
                        log_event_with_fields(
                            Event::SchemaInvalid,
                            &[("label", label.as_str()), ("reason", e.to_string().as_str())],
                        );
                        problems.push(e);
                    }
                }
            }
            Err(e) => {
                log_event_with_fields(Event::SchemaInvalid, &[("reason", e.to_string().as_str())]);
                problems.push(e);
            }
        }

        for kind in EntityKind::ALL {
            if !registry.contains(kind.schema_label()) {
                log_event_with_fields(
                    Event::SchemaMissing,
                    &[("kind", kind.to_string().as_str()), ("label", kind.schema_label())],
                );
            }
        }

        (registry, problems)
    }

    /// Reads, parses, and registers one schema file.
    pub fn load_file(&mut self, label: &str, path: &Path) -> SchemaResult<()> {
        let text = fs::read_to_string(path).map_err(|e| SchemaError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let source: Value = serde_json::from_str(&text).map_err(|e| SchemaError::Malformed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.register(label, source)?;

        log_event_with_fields(
            Event::SchemaLoaded,
            &[("label", label), ("path", path.display().to_string().as_str())],
        );
        Ok(())
    }

    /// Compiles and registers a schema document under `label`.
    ///
    /// Replaces any schema already registered for the label.
    pub fn register(&mut self, label: &str, source: Value) -> SchemaResult<()> {
        let validator = jsonschema::validator_for(&source).map_err(|e| SchemaError::Uncompilable {
            label: label.to_string(),
            reason: e.to_string(),
        })?;
        self.schemas
            .insert(label.to_string(), RegisteredSchema { source, validator });
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&RegisteredSchema> {
        self.schemas.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.schemas.contains_key(label)
    }

    /// Registered labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("labels", &self.schemas.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Schema file path for a label.
pub fn schema_path(schema_dir: &Path, label: &str) -> PathBuf {
    schema_dir.join(format!("{}{}", label, SCHEMA_SUFFIX))
}

/// `(label, path)` for each schema file in the folder. A missing folder has none.
fn schema_files(schema_dir: &Path) -> SchemaResult<Vec<(String, PathBuf)>> {
    if !schema_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(schema_dir).map_err(|e| SchemaError::FolderUnreadable {
        path: schema_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(label) = name.strip_suffix(SCHEMA_SUFFIX) {
            if !label.is_empty() && path.is_file() {
                files.push((label.to_string(), path.clone()));
            }
        }
    }
    files.sort();
    Ok(files)
}
