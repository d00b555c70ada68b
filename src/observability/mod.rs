//! Observability for storyworld
//!
//! Structured JSON-line logging of lifecycle and document events.
//!
//! ```ignore
//! use storyworld::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::DocumentSaved, &[("file", "ann.json")]);
//! ```
//!
//! Logging is write-only: it never alters the outcome of the operation it
//! describes, and a failed write to stdout/stderr is ignored.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event at its default severity with fields.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
