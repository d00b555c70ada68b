//! Editor
//!
//! Free-text editing of whole documents with a two-phase save:
//!
//! 1. Parse the edited text; a parse error rejects the save
//! 2. Validate against the kind's schema when validation is enabled and a
//!    schema is registered; a violation rejects the save
//! 3. Only then write, atomically, reserialized at [`SAVE_INDENT`]
//!
//! Nothing reaches disk unless both checks pass. Last write wins: there is
//! no detection of concurrent external edits.

mod errors;
mod session;
mod writer;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde_json::Value;

pub use errors::{EditorError, EditorResult};
pub use session::{EditSession, EditState, Rejection};
pub use writer::{format_document, validate_filename, write_atomic, SAVE_INDENT};

use crate::config::Settings;
use crate::entity::EntityKind;
use crate::loader::parse_document;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{SchemaRegistry, SchemaValidator};

/// Content type of exported documents.
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedDocument {
    pub path: PathBuf,
    pub document: Value,
    /// Validation note, when a schema was applied
    pub validation_note: Option<String>,
}

/// A downloadable copy of editor text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Edits documents under the given settings and schemas.
pub struct Editor<'a> {
    settings: &'a Settings,
    schemas: &'a SchemaRegistry,
}

impl<'a> Editor<'a> {
    pub fn new(settings: &'a Settings, schemas: &'a SchemaRegistry) -> Self {
        Self { settings, schemas }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enable_editing
    }

    /// Editor text for a document, at the configured indent width.
    pub fn editor_text(&self, document: &Value) -> EditorResult<String> {
        format_document(document, self.settings.indent_width)
    }

    /// Opens a viewing session pre-filled with the formatted document.
    pub fn open(&self, filename: &str, document: &Value, kind: Option<EntityKind>) -> EditorResult<EditSession> {
        if !self.is_enabled() {
            return Err(EditorError::EditingDisabled);
        }
        validate_filename(filename)?;
        Ok(EditSession::viewing(filename, kind, self.editor_text(document)?))
    }

    /// Opens a session already holding submitted text.
    ///
    /// Used when the viewing step happened on an earlier request.
    pub fn edit(&self, filename: &str, kind: Option<EntityKind>, text: impl Into<String>) -> EditorResult<EditSession> {
        if !self.is_enabled() {
            return Err(EditorError::EditingDisabled);
        }
        validate_filename(filename)?;
        let mut session = EditSession::viewing(filename, kind, String::new());
        session.begin_edit(text)?;
        Ok(session)
    }

    /// Parses, optionally validates, then writes `session`'s text to
    /// `folder/<filename>`.
    ///
    /// On parse or schema failure the session becomes `Rejected` and the
    /// file is untouched.
    pub fn save(&self, session: &mut EditSession, folder: &Path) -> EditorResult<SavedDocument> {
        if !self.is_enabled() {
            return Err(EditorError::EditingDisabled);
        }
        if session.state() != &EditState::Editing {
            return Err(session.invalid("save"));
        }
        validate_filename(session.filename())?;

        let document = match parse_document(session.text()) {
            Ok(doc) => doc,
            Err(e) => {
                let message = e.to_string();
                self.reject(session, Rejection::Parse(message.clone()));
                return Err(EditorError::Parse(message));
            }
        };

        let mut validation_note = None;
        if let (true, Some(kind)) = (self.settings.enable_schema_validation, session.kind()) {
            let outcome = SchemaValidator::new(self.schemas).validate_kind(&document, kind);
            if !outcome.valid {
                self.reject(session, Rejection::Schema(outcome.message.clone()));
                return Err(EditorError::SchemaViolation(outcome.message));
            }
            if outcome.schema_applied {
                validation_note = Some(outcome.message);
            }
        }

        let content = format_document(&document, SAVE_INDENT)?;
        let path = write_atomic(folder, session.filename(), content.as_bytes())?;
        session.settle(EditState::Saved);

        log_event_with_fields(
            Event::DocumentSaved,
            &[
                ("file", session.filename()),
                ("bytes", content.len().to_string().as_str()),
                ("path", path.display().to_string().as_str()),
            ],
        );

        Ok(SavedDocument {
            path,
            document,
            validation_note,
        })
    }

    /// Exports the session's current text, whatever its state.
    pub fn export(&self, session: &EditSession, now: NaiveDateTime) -> EditorResult<Export> {
        self.export_text(session.filename(), session.text(), now)
    }

    /// Exports arbitrary text as a download named after `filename`.
    pub fn export_text(&self, filename: &str, text: &str, now: NaiveDateTime) -> EditorResult<Export> {
        if !self.settings.show_download_button {
            return Err(EditorError::DownloadDisabled);
        }
        validate_filename(filename)?;

        let stem = filename.strip_suffix(".json").unwrap_or(filename);
        let file_name = format!("{}_{}.json", stem, now.format("%Y%m%d_%H%M%S"));
        log_event_with_fields(Event::DocumentExported, &[("file", filename), ("as", file_name.as_str())]);

        Ok(Export {
            file_name,
            content_type: EXPORT_CONTENT_TYPE,
            body: text.to_string(),
        })
    }

    fn reject(&self, session: &mut EditSession, rejection: Rejection) {
        log_event_with_fields(
            Event::SaveRejected,
            &[("file", session.filename()), ("reason", rejection.message())],
        );
        session.settle(EditState::Rejected(rejection));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn rating_schema() -> SchemaRegistry {
        let mut registry = SchemaRegistry::empty();
        registry
            .register(
                "character",
                json!({
                    "type": "object",
                    "properties": {
                        "static_attributes": {
                            "type": "object",
                            "properties": {
                                "economic_viability_rating": {"type": "integer", "minimum": 1, "maximum": 10}
                            }
                        }
                    }
                }),
            )
            .unwrap();
        registry
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2033, 10, 14)
            .unwrap()
            .and_hms_opt(18, 32, 5)
            .unwrap()
    }

    #[test]
    fn test_open_uses_configured_indent() {
        let settings = Settings {
            indent_width: 4,
            ..Settings::default()
        };
        let schemas = SchemaRegistry::empty();
        let editor = Editor::new(&settings, &schemas);

        let session = editor.open("ann.json", &json!({"name": "Ann"}), None).unwrap();
        assert_eq!(session.text(), "{\n    \"name\": \"Ann\"\n}");
        assert_eq!(session.state(), &EditState::Viewing);
    }

    #[test]
    fn test_save_writes_at_indent_two() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings {
            indent_width: 4,
            ..Settings::default()
        };
        let schemas = SchemaRegistry::empty();
        let editor = Editor::new(&settings, &schemas);

        let mut session = editor.edit("ann.json", None, "{\"name\":    \"Ann\"}").unwrap();
        let saved = editor.save(&mut session, tmp.path()).unwrap();

        assert_eq!(session.state(), &EditState::Saved);
        assert_eq!(fs::read_to_string(saved.path).unwrap(), "{\n  \"name\": \"Ann\"\n}");
    }

    #[test]
    fn test_parse_error_rejects_without_writing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ann.json"), "{}").unwrap();
        let settings = Settings::default();
        let schemas = SchemaRegistry::empty();
        let editor = Editor::new(&settings, &schemas);

        let mut session = editor.edit("ann.json", None, "{\"name\": ").unwrap();
        let err = editor.save(&mut session, tmp.path()).unwrap_err();

        assert!(matches!(err, EditorError::Parse(_)));
        assert!(matches!(session.state(), EditState::Rejected(Rejection::Parse(_))));
        assert_eq!(fs::read_to_string(tmp.path().join("ann.json")).unwrap(), "{}");
    }

    #[test]
    fn test_schema_violation_rejects_without_writing() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::default();
        let schemas = rating_schema();
        let editor = Editor::new(&settings, &schemas);

        let mut session = editor
            .edit(
                "ann.json",
                Some(EntityKind::Character),
                r#"{"static_attributes": {"economic_viability_rating": 11}}"#,
            )
            .unwrap();
        let err = editor.save(&mut session, tmp.path()).unwrap_err();

        let EditorError::SchemaViolation(message) = err else {
            panic!("expected schema violation");
        };
        assert!(message.contains("economic_viability_rating"));
        assert!(!tmp.path().join("ann.json").exists());
    }

    #[test]
    fn test_validation_disabled_allows_save() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings {
            enable_schema_validation: false,
            ..Settings::default()
        };
        let schemas = rating_schema();
        let editor = Editor::new(&settings, &schemas);

        let mut session = editor
            .edit(
                "ann.json",
                Some(EntityKind::Character),
                r#"{"static_attributes": {"economic_viability_rating": 11}}"#,
            )
            .unwrap();
        let saved = editor.save(&mut session, tmp.path()).unwrap();
        assert!(saved.validation_note.is_none());
    }

    #[test]
    fn test_no_kind_skips_validation() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::default();
        let schemas = rating_schema();
        let editor = Editor::new(&settings, &schemas);

        let mut session = editor
            .edit("ann.json", None, r#"{"static_attributes": {"economic_viability_rating": 11}}"#)
            .unwrap();
        assert!(editor.save(&mut session, tmp.path()).is_ok());
    }

    #[test]
    fn test_editing_disabled() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings {
            enable_editing: false,
            ..Settings::default()
        };
        let schemas = SchemaRegistry::empty();
        let editor = Editor::new(&settings, &schemas);

        assert_eq!(
            editor.open("ann.json", &json!({}), None).unwrap_err(),
            EditorError::EditingDisabled
        );
        assert_eq!(editor.edit("ann.json", None, "{}").unwrap_err(), EditorError::EditingDisabled);

        let mut session = EditSession::viewing("ann.json", None, "{}");
        session.begin_edit("{}").unwrap();
        assert_eq!(editor.save(&mut session, tmp.path()).unwrap_err(), EditorError::EditingDisabled);
        assert!(!tmp.path().join("ann.json").exists());
    }

    #[test]
    fn test_save_requires_editing_state() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::default();
        let schemas = SchemaRegistry::empty();
        let editor = Editor::new(&settings, &schemas);

        let mut session = editor.open("ann.json", &json!({}), None).unwrap();
        let err = editor.save(&mut session, tmp.path()).unwrap_err();
        assert!(matches!(err, EditorError::InvalidTransition { .. }));
    }

    #[test]
    fn test_export_names_and_body() {
        let settings = Settings::default();
        let schemas = SchemaRegistry::empty();
        let editor = Editor::new(&settings, &schemas);

        let mut session = editor.open("ann_charlotte.json", &json!({"name": "Ann"}), None).unwrap();
        session.begin_edit("{ not yet valid").unwrap();

        let export = editor.export(&session, noon()).unwrap();
        assert_eq!(export.file_name, "ann_charlotte_20331014_183205.json");
        assert_eq!(export.content_type, "application/json");
        assert_eq!(export.body, "{ not yet valid");
    }

    #[test]
    fn test_export_disabled() {
        let settings = Settings {
            show_download_button: false,
            ..Settings::default()
        };
        let schemas = SchemaRegistry::empty();
        let editor = Editor::new(&settings, &schemas);

        assert_eq!(
            editor.export_text("ann.json", "{}", noon()).unwrap_err(),
            EditorError::DownloadDisabled
        );
    }
}
