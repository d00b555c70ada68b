use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three kinds of document the storyworld holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Character,
    Scene,
    Location,
}

impl EntityKind {
    /// Sidebar order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Character, EntityKind::Scene, EntityKind::Location];

    /// Folder name under the storyworld root; also the URL section.
    pub fn section(&self) -> &'static str {
        match self {
            EntityKind::Character => "characters",
            EntityKind::Scene => "scenes",
            EntityKind::Location => "locations",
        }
    }

    /// Label used to look up the kind's schema.
    ///
    /// Locations are validated against the `region` schema.
    pub fn schema_label(&self) -> &'static str {
        match self {
            EntityKind::Character => "character",
            EntityKind::Scene => "scene",
            EntityKind::Location => "region",
        }
    }

    /// Heading shown above the section's document list.
    pub fn heading(&self) -> &'static str {
        match self {
            EntityKind::Character => "Characters",
            EntityKind::Scene => "Scenes",
            EntityKind::Location => "Locations",
        }
    }

    /// Title used when a document has no title field.
    pub fn untitled(&self) -> &'static str {
        match self {
            EntityKind::Character => "Unnamed",
            EntityKind::Scene => "Untitled",
            EntityKind::Location => "Unknown",
        }
    }

    /// Resolves a URL section (`characters`, ...) to a kind.
    pub fn from_section(section: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.section() == section)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Character => "character",
            EntityKind::Scene => "scene",
            EntityKind::Location => "location",
        };
        f.write_str(name)
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts the kind name, its schema label, or its section.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "character" | "characters" => Ok(EntityKind::Character),
            "scene" | "scenes" => Ok(EntityKind::Scene),
            "location" | "locations" | "region" => Ok(EntityKind::Location),
            other => Err(format!("unknown entity kind '{}'", other)),
        }
    }
}
