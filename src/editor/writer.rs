//! Document formatting and atomic persistence
//!
//! Writes go through a sibling temp file:
//! 1. Write to `.<name>.tmp`
//! 2. fsync the temp file
//! 3. Rename over the target (atomic on POSIX)
//!
//! A crash at any point leaves either the old or the new document on disk.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use super::errors::{EditorError, EditorResult};
use crate::loader::is_document_name;

/// Indent used for every document written to disk.
pub const SAVE_INDENT: usize = 2;

/// Serializes a document with `indent` spaces per level.
pub fn format_document(document: &Value, indent: usize) -> EditorResult<String> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| EditorError::Serialize(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| EditorError::Serialize(e.to_string()))
}

/// Accepts only a bare `*.json` file name.
///
/// Control characters and `"` are refused too: the name ends up in a
/// `Content-Disposition` header on download.
pub fn validate_filename(filename: &str) -> EditorResult<()> {
    let invalid = || EditorError::InvalidFilename(filename.to_string());

    if !is_document_name(filename)
        || filename.contains(['/', '\\', '"'])
        || filename.chars().any(char::is_control)
    {
        return Err(invalid());
    }
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid()),
    }
}

/// Atomically replaces `folder/filename` with `content`.
pub fn write_atomic(folder: &Path, filename: &str, content: &[u8]) -> EditorResult<PathBuf> {
    validate_filename(filename)?;

    let target = folder.join(filename);
    let temp = folder.join(format!(".{}.tmp", filename));
    let io_err = |path: &Path, e: std::io::Error| EditorError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    fs::create_dir_all(folder).map_err(|e| io_err(folder, e))?;

    let result = (|| {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp)
            .map_err(|e| io_err(&temp, e))?;
        file.write_all(content).map_err(|e| io_err(&temp, e))?;
        file.sync_all().map_err(|e| io_err(&temp, e))?;
        fs::rename(&temp, &target).map_err(|e| io_err(&target, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result?;

    // Make the rename itself durable
    if let Ok(dir) = File::open(folder) {
        let _ = dir.sync_all();
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_format_indent_widths() {
        let doc = json!({"name": "Ann", "groups": ["A"]});
        assert_eq!(
            format_document(&doc, 2).unwrap(),
            "{\n  \"name\": \"Ann\",\n  \"groups\": [\n    \"A\"\n  ]\n}"
        );
        assert_eq!(
            format_document(&doc, 4).unwrap(),
            "{\n    \"name\": \"Ann\",\n    \"groups\": [\n        \"A\"\n    ]\n}"
        );
    }

    #[test]
    fn test_format_keeps_key_order_and_unicode() {
        let doc: Value = serde_json::from_str(r#"{"z": 1, "a": "Sandström"}"#).unwrap();
        let text = format_document(&doc, 2).unwrap();
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
        assert!(text.contains("Sandström"));
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("ann_charlotte.json").is_ok());
        assert!(validate_filename("034 ann returns.json").is_ok());
        assert!(validate_filename("../settings.json").is_err());
        assert!(validate_filename("sub/ann.json").is_err());
        assert!(validate_filename("..\\ann.json").is_err());
        assert!(validate_filename("ann.txt").is_err());
        assert!(validate_filename("").is_err());
        assert!(validate_filename("a\nb.json").is_err());
        assert!(validate_filename("a\tb.json").is_err());
        assert!(validate_filename("a\0b.json").is_err());
        assert!(validate_filename("a\u{7f}b.json").is_err());
        assert!(validate_filename("a\"b.json").is_err());
    }

    #[test]
    fn test_write_atomic_replaces_and_cleans_up() {
        let tmp = TempDir::new().unwrap();
        let folder = tmp.path().join("characters");

        let path = write_atomic(&folder, "mary.json", b"{}").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"{}");

        write_atomic(&folder, "mary.json", b"{\"name\": \"Mary\"}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"name\": \"Mary\"}");

        let leftovers: Vec<_> = fs::read_dir(&folder)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
