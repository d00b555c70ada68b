use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigResult};
use crate::observability::{log_event_with_fields, Event};

/// Widest indent the editor accepts.
pub const MAX_INDENT_WIDTH: usize = 8;

/// UI toggles read from the optional settings file.
///
/// Keys absent from the file take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Show the download button next to the editor (default: true)
    #[serde(default = "default_true")]
    pub show_download_button: bool,

    /// Indent used when pre-filling the editor (default: 2)
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Offer the editor and accept saves (default: true)
    #[serde(default = "default_true")]
    pub enable_editing: bool,

    /// Block saves that fail the kind's schema (default: true)
    #[serde(default = "default_true")]
    pub enable_schema_validation: bool,
}

fn default_true() -> bool {
    true
}

fn default_indent_width() -> usize {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_download_button: true,
            indent_width: default_indent_width(),
            enable_editing: true,
            enable_schema_validation: true,
        }
    }
}

/// Settings in effect plus the warning to surface when defaults were used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warning: Option<String>,
}

impl Settings {
    /// Parses settings from JSON text.
    pub fn from_json(text: &str, origin: &str) -> ConfigResult<Self> {
        let settings: Settings = serde_json::from_str(text).map_err(|e| ConfigError::Malformed {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and validates a settings file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound(origin.clone())
            } else {
                ConfigError::Unreadable {
                    path: origin.clone(),
                    reason: e.to_string(),
                }
            }
        })?;
        Self::from_json(&text, &origin)
    }

    /// Reads a settings file, falling back to defaults on any problem.
    ///
    /// Never fails; the returned warning says why defaults are in use.
    pub fn load_or_default(path: &Path) -> LoadedSettings {
        match Self::from_file(path) {
            Ok(settings) => {
                log_event_with_fields(Event::SettingsLoaded, &[("path", path.display().to_string().as_str())]);
                LoadedSettings {
                    settings,
                    warning: None,
                }
            }
            Err(e) => {
                let warning = format!("{}; using default settings", e);
                log_event_with_fields(Event::SettingsFallback, &[("reason", warning.as_str())]);
                LoadedSettings {
                    settings: Settings::default(),
                    warning: Some(warning),
                }
            }
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.indent_width > MAX_INDENT_WIDTH {
            return Err(ConfigError::Invalid {
                key: "indent_width".into(),
                reason: format!("{} exceeds the maximum of {}", self.indent_width, MAX_INDENT_WIDTH),
            });
        }
        Ok(())
    }
}
