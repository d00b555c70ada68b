use serde_json::Value;

use super::kind::EntityKind;

/// Whether a field value is worth displaying.
///
/// `null`, blank strings, and empty lists/mappings count as absent.
pub fn non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(non_empty),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Single-line text for a field value, or `None` when it should be omitted.
///
/// Lists of scalars are joined with `, `; nested structures fall back to
/// compact JSON.
pub fn field_text(value: &Value) -> Option<String> {
    if !non_empty(value) {
        return None;
    }
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(is_scalar) => list_items(value).join(", "),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        other => other.to_string(),
    };
    Some(text)
}

/// Displayable entries of a list field. A scalar counts as a one-item list.
pub fn list_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(field_text).collect(),
        other => field_text(other).into_iter().collect(),
    }
}

/// Title shown on a document's expandable block.
pub fn display_title(kind: EntityKind, document: &Value) -> String {
    let keys: &[&str] = match kind {
        EntityKind::Character => &["name"],
        EntityKind::Scene => &["title"],
        EntityKind::Location => &["region_name", "name"],
    };
    keys.iter()
        .filter_map(|key| document.get(*key))
        .find_map(field_text)
        .unwrap_or_else(|| kind.untitled().to_string())
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_empty() {
        assert!(!non_empty(&json!(null)));
        assert!(!non_empty(&json!("   ")));
        assert!(!non_empty(&json!([])));
        assert!(!non_empty(&json!([null, ""])));
        assert!(!non_empty(&json!({})));
        assert!(non_empty(&json!(0)));
        assert!(non_empty(&json!(false)));
        assert!(non_empty(&json!(["x"])));
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(&json!("quiet")), Some("quiet".to_string()));
        assert_eq!(field_text(&json!(7)), Some("7".to_string()));
        assert_eq!(field_text(&json!(["Ghost Trainers", "Crew"])), Some("Ghost Trainers, Crew".to_string()));
        assert_eq!(field_text(&json!({"a": 1})), Some("{\"a\":1}".to_string()));
        assert_eq!(field_text(&json!("")), None);
    }

    #[test]
    fn test_list_items_skips_blanks() {
        assert_eq!(list_items(&json!(["flooding", "", null, "power cuts"])), vec!["flooding", "power cuts"]);
        assert_eq!(list_items(&json!("single")), vec!["single"]);
    }

    #[test]
    fn test_display_title_fallbacks() {
        assert_eq!(display_title(EntityKind::Character, &json!({"name": "Ann Charlotte"})), "Ann Charlotte");
        assert_eq!(display_title(EntityKind::Character, &json!({})), "Unnamed");
        assert_eq!(display_title(EntityKind::Scene, &json!({"scene_id": "034"})), "Untitled");
        assert_eq!(display_title(EntityKind::Location, &json!({"name": "Lake Kivu"})), "Lake Kivu");
        assert_eq!(
            display_title(EntityKind::Location, &json!({"region_name": "Stockholm", "name": "old"})),
            "Stockholm"
        );
        assert_eq!(display_title(EntityKind::Location, &json!([1, 2])), "Unknown");
    }
}
