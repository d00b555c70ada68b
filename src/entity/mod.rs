//! Entity kinds and field accessors
//!
//! Documents stay as `serde_json::Value`; nothing here forces a shape on
//! them. The helpers only answer "is this field present and displayable".

mod fields;
mod kind;

pub use fields::{display_title, field_text, list_items, non_empty};
pub use kind::EntityKind;
