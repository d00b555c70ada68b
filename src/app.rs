//! Startup context
//!
//! Everything the loader, validator, and editor need, built once at
//! startup and passed down explicitly. Immutable after construction, so the
//! HTTP server shares it behind an `Arc` without locks.

use std::path::Path;

use crate::config::{Layout, LoadedSettings, Settings};
use crate::editor::Editor;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{SchemaError, SchemaRegistry, SchemaValidator};

#[derive(Debug)]
pub struct AppState {
    pub layout: Layout,
    pub settings: Settings,
    /// Why default settings are in use, if they are
    pub settings_warning: Option<String>,
    pub schemas: SchemaRegistry,
    /// Schema files that were found but could not be used
    pub schema_problems: Vec<SchemaError>,
}

impl AppState {
    pub fn new(
        layout: Layout,
        settings: LoadedSettings,
        schemas: SchemaRegistry,
        schema_problems: Vec<SchemaError>,
    ) -> Self {
        Self {
            layout,
            settings: settings.settings,
            settings_warning: settings.warning,
            schemas,
            schema_problems,
        }
    }

    /// Loads settings and schemas for the storyworld at `layout`.
    ///
    /// Never fails: missing or broken inputs degrade to defaults and are
    /// reported through `settings_warning` and `schema_problems`.
    pub fn bootstrap(layout: Layout, settings_path: &Path) -> Self {
        log_event_with_fields(Event::BootStart, &[("root", layout.root().display().to_string().as_str())]);

        let settings = Settings::load_or_default(settings_path);
        let (schemas, problems) = SchemaRegistry::load_dir(&layout.schemas_dir());
        Self::new(layout, settings, schemas, problems)
    }

    /// Fixed settings and schemas, no disk reads beyond the layout.
    pub fn with_parts(layout: Layout, settings: Settings, schemas: SchemaRegistry) -> Self {
        Self::new(
            layout,
            LoadedSettings {
                settings,
                warning: None,
            },
            schemas,
            Vec::new(),
        )
    }

    pub fn editor(&self) -> Editor<'_> {
        Editor::new(&self.settings, &self.schemas)
    }

    pub fn validator(&self) -> SchemaValidator<'_> {
        SchemaValidator::new(&self.schemas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_bootstrap_empty_root() {
        let tmp = TempDir::new().unwrap();
        let layout = Layout::new(tmp.path());
        let state = AppState::bootstrap(layout.clone(), &layout.default_settings_path());

        assert_eq!(state.settings, Settings::default());
        assert!(state.settings_warning.is_some());
        assert!(state.schemas.is_empty());
        assert!(state.schema_problems.is_empty());
    }

    #[test]
    fn test_bootstrap_reads_settings_and_schemas() {
        let tmp = TempDir::new().unwrap();
        let layout = Layout::new(tmp.path());
        fs::write(layout.default_settings_path(), r#"{"enable_editing": false}"#).unwrap();
        fs::create_dir(layout.schemas_dir()).unwrap();
        fs::write(layout.schemas_dir().join("region.schema.json"), r#"{"type": "object"}"#).unwrap();

        let state = AppState::bootstrap(layout.clone(), &layout.default_settings_path());
        assert!(!state.settings.enable_editing);
        assert!(state.settings_warning.is_none());
        assert!(state.schemas.contains("region"));
        assert!(!state.editor().is_enabled());
    }
}
