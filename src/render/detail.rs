//! Structured detail views
//!
//! Maps known fields of a document onto sections. Absent, null, or blank
//! fields are omitted; nothing is computed beyond presence checks. Fields
//! the kind does not know about land in a trailing "Other fields" section.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::entity::{field_text, list_items, EntityKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub label: String,
    pub value: String,
}

/// One entry of a character's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub label: String,
    pub traits: Vec<Pair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", content = "items", rename_all = "snake_case")]
pub enum SectionBody {
    /// Two-column label/value rows
    Pairs(Vec<Pair>),
    /// One line per entry
    Lines(Vec<String>),
    /// Expandable blocks in stored order
    Timeline(Vec<Period>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub sections: Vec<Section>,
}

impl DetailView {
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn push(&mut self, heading: &str, body: SectionBody) {
        let empty = match &body {
            SectionBody::Pairs(items) => items.is_empty(),
            SectionBody::Lines(items) => items.is_empty(),
            SectionBody::Timeline(items) => items.is_empty(),
        };
        if !empty {
            self.sections.push(Section {
                heading: heading.to_string(),
                body,
            });
        }
    }
}

const CHARACTER_PROFILE: &[&str] = &[
    "id",
    "name",
    "pronouns",
    "groups",
    "other_names",
    "personality",
    "background",
    "physical_description",
    "dialogue_style",
];
const CHARACTER_NESTED: &[&str] = &["relationships", "static_attributes", "dynamic_attributes"];

const LOCATION_SUMMARY: &[&str] = &["region_name", "name", "tone", "tech_level", "elevation"];
const LOCATION_LISTS: &[(&str, &str)] = &[
    ("problems", "Problems"),
    ("infrastructure", "Infrastructure"),
    ("youth_trends", "Youth trends"),
];

const SCENE_SUMMARY: &[&str] = &[
    "scene_id",
    "title",
    "location",
    "time",
    "tags",
    "characters_present",
    "summary",
];

/// Builds the detail view for a document of `kind`.
///
/// A document that is not a JSON object has no known fields and renders
/// as an empty view.
pub fn render_detail(kind: EntityKind, document: &Value) -> DetailView {
    let Some(fields) = document.as_object() else {
        return DetailView::default();
    };

    let mut view = DetailView::default();
    let known: Vec<&str> = match kind {
        EntityKind::Character => {
            render_character(fields, &mut view);
            CHARACTER_PROFILE.iter().chain(CHARACTER_NESTED).copied().collect()
        }
        EntityKind::Location => {
            render_location(fields, &mut view);
            LOCATION_SUMMARY
                .iter()
                .copied()
                .chain(LOCATION_LISTS.iter().map(|(key, _)| *key))
                .chain(["notes"])
                .collect()
        }
        EntityKind::Scene => {
            render_scene(fields, &mut view);
            SCENE_SUMMARY.iter().copied().chain(["dialogue"]).collect()
        }
    };

    let others = fields
        .iter()
        .filter(|(key, value)| !(known.contains(&key.as_str()) && has_expected_shape(key, value)))
        .filter_map(|(key, value)| pair(key, value))
        .collect();
    view.push("Other fields", SectionBody::Pairs(others));

    view
}

/// Structured fields only render as their own section in the expected
/// shape; any other value falls through to "Other fields".
fn has_expected_shape(key: &str, value: &Value) -> bool {
    match key {
        "relationships" | "static_attributes" => value.is_object(),
        "dynamic_attributes" | "dialogue" => value.is_array(),
        _ => true,
    }
}

fn render_character(fields: &Map<String, Value>, view: &mut DetailView) {
    view.push("Profile", SectionBody::Pairs(pairs_for(fields, CHARACTER_PROFILE)));

    if let Some(Value::Object(attributes)) = fields.get("static_attributes") {
        let rows = attributes.iter().filter_map(|(key, value)| pair(key, value)).collect();
        view.push("Attributes", SectionBody::Pairs(rows));
    }

    if let Some(Value::Object(relationships)) = fields.get("relationships") {
        let lines = relationships
            .iter()
            .filter_map(|(person, description)| {
                field_text(description).map(|text| format!("{}: {}", person, text))
            })
            .collect();
        view.push("Relationships", SectionBody::Lines(lines));
    }

    if let Some(Value::Array(periods)) = fields.get("dynamic_attributes") {
        let timeline = periods
            .iter()
            .enumerate()
            .filter_map(|(i, period)| timeline_period(i, period))
            .collect();
        view.push("Timeline", SectionBody::Timeline(timeline));
    }
}

fn timeline_period(index: usize, period: &Value) -> Option<Period> {
    let entry = period.as_object()?;
    let label = entry
        .get("time")
        .and_then(field_text)
        .unwrap_or_else(|| format!("Period {}", index + 1));

    let mut traits: Vec<Pair> = match entry.get("personality") {
        Some(Value::Object(personality)) => personality
            .iter()
            .filter_map(|(name, value)| field_text(value).map(|v| Pair { label: name.clone(), value: v }))
            .collect(),
        Some(other) => field_text(other)
            .map(|v| Pair {
                label: "personality".into(),
                value: v,
            })
            .into_iter()
            .collect(),
        None => Vec::new(),
    };
    traits.extend(
        entry
            .iter()
            .filter(|(key, _)| key.as_str() != "time" && key.as_str() != "personality")
            .filter_map(|(key, value)| field_text(value).map(|v| Pair { label: key.clone(), value: v })),
    );

    Some(Period { label, traits })
}

fn render_location(fields: &Map<String, Value>, view: &mut DetailView) {
    view.push("Region", SectionBody::Pairs(pairs_for(fields, LOCATION_SUMMARY)));

    for (key, heading) in LOCATION_LISTS {
        if let Some(value) = fields.get(*key) {
            view.push(heading, SectionBody::Lines(list_items(value)));
        }
    }

    if let Some(notes) = fields.get("notes").and_then(field_text) {
        view.push("Notes", SectionBody::Lines(vec![notes]));
    }
}

fn render_scene(fields: &Map<String, Value>, view: &mut DetailView) {
    view.push("Scene", SectionBody::Pairs(pairs_for(fields, SCENE_SUMMARY)));

    if let Some(Value::Array(lines)) = fields.get("dialogue") {
        let dialogue = lines.iter().filter_map(dialogue_line).collect();
        view.push("Dialogue", SectionBody::Lines(dialogue));
    }
}

fn dialogue_line(entry: &Value) -> Option<String> {
    let Some(entry) = entry.as_object() else {
        return field_text(entry);
    };
    let line = entry.get("line").and_then(field_text)?;
    let speaker = entry
        .get("speaker")
        .and_then(field_text)
        .unwrap_or_else(|| "Unknown".to_string());

    Some(match entry.get("tone").and_then(field_text) {
        Some(tone) => format!("{} ({}): {}", speaker, tone, line),
        None => format!("{}: {}", speaker, line),
    })
}

fn pairs_for(fields: &Map<String, Value>, keys: &[&str]) -> Vec<Pair> {
    keys.iter()
        .filter_map(|key| fields.get(*key).and_then(|value| pair(key, value)))
        .collect()
}

fn pair(key: &str, value: &Value) -> Option<Pair> {
    field_text(value).map(|value| Pair {
        label: humanize(key),
        value,
    })
}

/// `economic_viability_rating` → `Economic viability rating`
pub fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => key.to_string(),
    }
}
