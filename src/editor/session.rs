//! Per-document edit session
//!
//! ```text
//! Viewing ──begin_edit──▶ Editing ──save──▶ Saved ──────────┐
//!    ▲                                  └──▶ Rejected(..) ──┤
//!    └──────────────────── acknowledge ─────────────────────┘
//! ```
//!
//! Each interaction ends in a terminal state; there is no multi-step
//! transaction. Over HTTP a session lives for one request and is dropped in
//! its terminal state; `acknowledge` is for callers that keep a session
//! across interactions.

use std::fmt;

use super::errors::{EditorError, EditorResult};
use crate::entity::EntityKind;

/// Why a save did not write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Parse(String),
    Schema(String),
}

impl Rejection {
    pub fn message(&self) -> &str {
        match self {
            Rejection::Parse(m) | Rejection::Schema(m) => m.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    Editing,
    Saved,
    Rejected(Rejection),
}

impl EditState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EditState::Saved | EditState::Rejected(_))
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditState::Viewing => f.write_str("viewing"),
            EditState::Editing => f.write_str("editing"),
            EditState::Saved => f.write_str("saved"),
            EditState::Rejected(Rejection::Parse(_)) => f.write_str("rejected (parse error)"),
            EditState::Rejected(Rejection::Schema(_)) => f.write_str("rejected (schema error)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    filename: String,
    kind: Option<EntityKind>,
    text: String,
    state: EditState,
}

impl EditSession {
    /// A session viewing `text`.
    pub fn viewing(filename: impl Into<String>, kind: Option<EntityKind>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            kind,
            text: text.into(),
            state: EditState::Viewing,
        }
    }

    /// Replaces the text with the author's edit. Only valid while viewing.
    pub fn begin_edit(&mut self, text: impl Into<String>) -> EditorResult<()> {
        if self.state != EditState::Viewing {
            return Err(self.invalid("edit"));
        }
        self.text = text.into();
        self.state = EditState::Editing;
        Ok(())
    }

    /// Returns a finished session to viewing.
    pub fn acknowledge(&mut self) -> EditorResult<()> {
        if !self.state.is_terminal() {
            return Err(self.invalid("acknowledge"));
        }
        self.state = EditState::Viewing;
        Ok(())
    }

    pub(super) fn settle(&mut self, state: EditState) {
        self.state = state;
    }

    pub(super) fn invalid(&self, action: &'static str) -> EditorError {
        EditorError::InvalidTransition {
            action,
            state: self.state.to_string(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn kind(&self) -> Option<EntityKind> {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }
}
