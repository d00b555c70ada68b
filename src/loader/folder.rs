use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::errors::{LoaderError, LoaderResult};
use crate::observability::{log_event_with_fields, Event};

/// One file's load result.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEntry {
    Document(Value),
    /// Read or parse failure, kept in place of the document.
    Failed { error: String },
}

impl DocumentEntry {
    pub fn document(&self) -> Option<&Value> {
        match self {
            DocumentEntry::Document(doc) => Some(doc),
            DocumentEntry::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DocumentEntry::Document(_) => None,
            DocumentEntry::Failed { error } => Some(error.as_str()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentEntry::Failed { .. })
    }
}

/// Documents serialize as themselves; failures as `{"error": "..."}`.
impl Serialize for DocumentEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocumentEntry::Document(doc) => doc.serialize(serializer),
            DocumentEntry::Failed { error } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

/// Filename → load result, ordered by filename.
pub type FolderContents = BTreeMap<String, DocumentEntry>;

/// Whether a directory entry name is a candidate document.
pub fn is_document_name(name: &str) -> bool {
    name.ends_with(".json") && name.len() > ".json".len()
}

/// Parses one document's text.
pub fn parse_document(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Loads every `*.json` file in `folder`.
///
/// A missing folder yields an empty mapping. A file that cannot be read
/// or parsed yields a [`DocumentEntry::Failed`] and loading continues.
pub fn load_folder(folder: &Path) -> LoaderResult<FolderContents> {
    let mut contents = FolderContents::new();

    if !folder.exists() {
        log_event_with_fields(Event::FolderMissing, &[("folder", folder.display().to_string().as_str())]);
        return Ok(contents);
    }
    if !folder.is_dir() {
        return Err(LoaderError::NotAFolder(folder.display().to_string()));
    }

    let entries = fs::read_dir(folder).map_err(|e| LoaderError::FolderUnreadable {
        path: folder.display().to_string(),
        reason: e.to_string(),
    })?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log_event_with_fields(
                    Event::DocumentLoadFailed,
                    &[("folder", folder.display().to_string().as_str()), ("reason", e.to_string().as_str())],
                );
                continue;
            }
        };

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !is_document_name(&name) || entry.path().is_dir() {
            continue;
        }

        let loaded = load_file(&entry.path());
        if let Some(error) = loaded.error() {
            log_event_with_fields(Event::DocumentLoadFailed, &[("file", name.as_str()), ("reason", error)]);
        }
        contents.insert(name, loaded);
    }

    Ok(contents)
}

/// Loads a single document file, never failing.
pub fn load_file(path: &Path) -> DocumentEntry {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            return DocumentEntry::Failed {
                error: format!("read failed: {}", e),
            }
        }
    };

    match parse_document(&text) {
        Ok(doc) => DocumentEntry::Document(doc),
        Err(e) => DocumentEntry::Failed {
            error: format!("invalid JSON: {}", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_is_document_name() {
        assert!(is_document_name("ann_charlotte.json"));
        assert!(!is_document_name(".json"));
        assert!(!is_document_name("notes.txt"));
        assert!(!is_document_name("ann.json.bak"));
    }

    #[test]
    fn test_missing_folder_is_empty() {
        let tmp = TempDir::new().unwrap();
        let contents = load_folder(&tmp.path().join("characters")).unwrap();
        assert!(contents.is_empty());
    }

    #[test]
    fn test_file_instead_of_folder() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("characters");
        fs::write(&path, "{}").unwrap();

        assert!(matches!(load_folder(&path), Err(LoaderError::NotAFolder(_))));
    }

    #[test]
    fn test_skips_other_files_and_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("readme.md"), "# hi").unwrap();
        fs::create_dir(tmp.path().join("nested.json")).unwrap();
        fs::write(tmp.path().join("mary.json"), r#"{"name": "Mary"}"#).unwrap();

        let contents = load_folder(tmp.path()).unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents["mary.json"].document(), Some(&json!({"name": "Mary"})));
    }

    #[test]
    fn test_failed_entry_serializes_as_error_record() {
        let entry = DocumentEntry::Failed {
            error: "invalid JSON: EOF".into(),
        };
        assert_eq!(serde_json::to_value(&entry).unwrap(), json!({"error": "invalid JSON: EOF"}));

        let doc = DocumentEntry::Document(json!({"title": "x"}));
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({"title": "x"}));
    }

    #[test]
    fn test_invalid_utf8_is_isolated() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.json"), [0xff, 0xfe, 0x00]).unwrap();

        let entry = load_file(&tmp.path().join("bad.json"));
        assert!(entry.is_failed());
    }
}
