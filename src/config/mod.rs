//! Configuration for storyworld
//!
//! Two explicit values built once at startup and passed to every
//! component that needs them:
//!
//! - [`Layout`]: where the document, schema, and settings files live
//! - [`Settings`]: UI toggles from the optional settings file
//!
//! A missing or malformed settings file never stops startup; see
//! [`Settings::load_or_default`].

mod errors;
mod layout;
mod settings;

pub use errors::{ConfigError, ConfigResult};
pub use layout::{Layout, SCHEMAS_FOLDER, SETTINGS_FILE};
pub use settings::{LoadedSettings, Settings, MAX_INDENT_WIDTH};
