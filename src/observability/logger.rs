//! Structured JSON-line logger
//!
//! - One line per event
//! - `event` and `severity` first, remaining fields sorted by key
//! - Synchronous, unbuffered
//! - INFO/WARN/TRACE to stdout, ERROR/FATAL to stderr

use std::fmt;
use std::io::{self, Write};

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-request detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recovered problems (bad file, missing settings)
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// The process cannot continue
    Fatal = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn to_stderr(&self) -> bool {
        *self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stateless JSON logger.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if severity.to_stderr() {
            Self::write_line(severity, event, fields, &mut io::stderr());
        } else {
            Self::write_line(severity, event, fields, &mut io::stdout());
        }
    }

    /// Formats a single log line (including the trailing newline).
    pub fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut record = Map::new();
        record.insert("event".into(), Value::String(event.to_string()));
        record.insert("severity".into(), Value::String(severity.as_str().to_string()));

        let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);
        for (key, value) in sorted {
            // event and severity are reserved
            if *key == "event" || *key == "severity" {
                continue;
            }
            record.insert((*key).to_string(), Value::String((*value).to_string()));
        }

        let mut line = Value::Object(record).to_string();
        line.push('\n');
        line
    }

    fn write_line<W: Write>(severity: Severity, event: &str, fields: &[(&str, &str)], writer: &mut W) {
        let line = Self::format_line(severity, event, fields);
        // Logging must never take the tool down
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}
