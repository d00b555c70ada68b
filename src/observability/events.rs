//! Observable events
//!
//! Every log line the tool emits names one of these events.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Startup begins
    BootStart,
    /// HTTP server bound and serving
    ServerListening,
    /// `check` command finished
    CheckComplete,

    // Configuration
    /// Settings file read and accepted
    SettingsLoaded,
    /// Settings missing or malformed, defaults in use
    SettingsFallback,

    // Schemas
    /// A schema file compiled and registered
    SchemaLoaded,
    /// No schema file for a kind; validation disabled for it
    SchemaMissing,
    /// Schema file present but unusable
    SchemaInvalid,

    // Documents
    /// A section folder does not exist
    FolderMissing,
    /// A single document failed to read or parse
    DocumentLoadFailed,
    /// Editor wrote a document
    DocumentSaved,
    /// Editor refused to write a document
    SaveRejected,
    /// Current editor text exported as a download
    DocumentExported,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ServerListening => "SERVER_LISTENING",
            Event::CheckComplete => "CHECK_COMPLETE",
            Event::SettingsLoaded => "SETTINGS_LOADED",
            Event::SettingsFallback => "SETTINGS_FALLBACK",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::SchemaMissing => "SCHEMA_MISSING",
            Event::SchemaInvalid => "SCHEMA_INVALID",
            Event::FolderMissing => "FOLDER_MISSING",
            Event::DocumentLoadFailed => "DOCUMENT_LOAD_FAILED",
            Event::DocumentSaved => "DOCUMENT_SAVED",
            Event::SaveRejected => "SAVE_REJECTED",
            Event::DocumentExported => "DOCUMENT_EXPORTED",
        }
    }

    /// Severity the event is logged at.
    pub fn severity(&self) -> Severity {
        match self {
            Event::SettingsFallback
            | Event::SchemaInvalid
            | Event::FolderMissing
            | Event::DocumentLoadFailed
            | Event::SaveRejected => Severity::Warn,
            Event::DocumentExported => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
