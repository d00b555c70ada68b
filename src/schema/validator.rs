//! Document validation against registered schemas
//!
//! - A label with no registered schema always passes, with a note saying so
//! - Otherwise standard JSON-Schema validation; the first error is reported
//! - Validation never mutates the document and has no side effects

use serde::Serialize;
use serde_json::Value;

use super::registry::SchemaRegistry;
use crate::entity::EntityKind;

/// Pass/fail plus a message fit for showing to the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: String,
    /// False when no schema was registered and the check was skipped.
    pub schema_applied: bool,
}

impl ValidationOutcome {
    fn skipped(label: &str) -> Self {
        Self {
            valid: true,
            message: format!("no schema registered for '{}'; validation skipped", label),
            schema_applied: false,
        }
    }

    fn passed(label: &str) -> Self {
        Self {
            valid: true,
            message: format!("valid against the '{}' schema", label),
            schema_applied: true,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            valid: false,
            message,
            schema_applied: true,
        }
    }
}

/// Validates documents using a borrowed registry.
pub struct SchemaValidator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Validates `document` against the schema registered for `label`.
    pub fn validate(&self, document: &Value, label: &str) -> ValidationOutcome {
        let Some(schema) = self.registry.get(label) else {
            return ValidationOutcome::skipped(label);
        };

        match schema.validator().iter_errors(document).next() {
            None => ValidationOutcome::passed(label),
            Some(error) => {
                let location = error.instance_path.to_string();
                let location = if location.is_empty() { "(document root)".to_string() } else { location };
                ValidationOutcome::failed(format!("{}: {}", location, error))
            }
        }
    }

    /// Validates `document` against the schema for `kind`.
    pub fn validate_kind(&self, document: &Value, kind: EntityKind) -> ValidationOutcome {
        self.validate(document, kind.schema_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::empty();
        registry
            .register(
                "character",
                json!({
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "groups": {"type": "array", "items": {"type": "string"}}
                    },
                    "required": ["name"]
                }),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_passing_document() {
        let registry = registry();
        let outcome = SchemaValidator::new(&registry).validate(&json!({"name": "Mary"}), "character");
        assert!(outcome.valid);
        assert!(outcome.schema_applied);
    }

    #[test]
    fn test_failure_names_location() {
        let registry = registry();
        let outcome = SchemaValidator::new(&registry).validate(&json!({"name": "Mary", "groups": [3]}), "character");
        assert!(!outcome.valid);
        assert!(outcome.message.starts_with("/groups/0"), "{}", outcome.message);
    }

    #[test]
    fn test_root_failure() {
        let registry = registry();
        let outcome = SchemaValidator::new(&registry).validate(&json!({}), "character");
        assert!(!outcome.valid);
        assert!(outcome.message.contains("(document root)"));
        assert!(outcome.message.contains("name"));
    }

    #[test]
    fn test_unregistered_label_skips() {
        let registry = registry();
        let outcome = SchemaValidator::new(&registry).validate(&json!("anything"), "scene");
        assert!(outcome.valid);
        assert!(!outcome.schema_applied);
        assert!(outcome.message.contains("no schema"));
    }

    #[test]
    fn test_validate_kind_maps_location_to_region() {
        let mut registry = SchemaRegistry::empty();
        registry.register("region", json!({"type": "object"})).unwrap();

        let outcome = SchemaValidator::new(&registry).validate_kind(&json!([]), EntityKind::Location);
        assert!(!outcome.valid);
    }
}
