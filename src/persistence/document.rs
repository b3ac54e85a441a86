//! Versioned design document format.
//!
//! A document is what gets written to disk and sent to the design store:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "metadata": { "title": "...", "createdAt": "...", "updatedAt": "...", "platform": "..." },
//!   "template": { "modules": [ ... ] },
//!   "boards": [ ... ],
//!   "settings": { "units": "cm", "material": "pine", "thickness": 18 }
//! }
//! ```
//!
//! Reading is deliberately lenient. Missing top-level fields default
//! independently, the legacy names `boxTemplate` and `independentBoards` are
//! accepted, malformed free boards are skipped and a version mismatch is only
//! logged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_BOARD_THICKNESS_MM, DEFAULT_DESIGN_TITLE, DEFAULT_MATERIAL, DOCUMENT_VERSION,
    PLATFORM_NAME,
};
use crate::models::{BoxModule, DesignSnapshot, FreeBoard};

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignMetadata {
    /// Human-readable title
    pub title: String,
    /// When the design was first written
    pub created_at: DateTime<Utc>,
    /// When the design was last written
    pub updated_at: DateTime<Utc>,
    /// Producing application
    pub platform: String,
}

/// Module-based part of a design.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateSection {
    /// Box modules in creation order
    #[serde(default)]
    pub modules: Vec<BoxModule>,
}

/// Global design settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSettings {
    /// Length unit, always `cm`
    pub units: String,
    /// Predominant material
    pub material: String,
    /// Predominant board thickness in millimeters
    pub thickness: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            units: "cm".to_string(),
            material: DEFAULT_MATERIAL.to_string(),
            thickness: DEFAULT_BOARD_THICKNESS_MM,
        }
    }
}

/// A complete, versioned design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    /// Schema version
    pub version: String,
    /// Title and timestamps
    pub metadata: DesignMetadata,
    /// Modules
    pub template: TemplateSection,
    /// Free-standing boards
    pub boards: Vec<FreeBoard>,
    /// Units and material defaults
    pub settings: DesignSettings,
}

impl DesignDocument {
    /// Document title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// The design content as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DesignSnapshot {
        DesignSnapshot {
            modules: self.template.modules.clone(),
            free_boards: self.boards.clone(),
        }
    }

    /// Serializes the document into a JSON value.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Builds a document from a snapshot. Blank titles fall back to the default title.
#[must_use]
pub fn to_persistable(snapshot: &DesignSnapshot, title: &str) -> DesignDocument {
    to_persistable_at(snapshot, title, Utc::now())
}

/// Builds a document with an explicit timestamp.
#[must_use]
pub fn to_persistable_at(
    snapshot: &DesignSnapshot,
    title: &str,
    now: DateTime<Utc>,
) -> DesignDocument {
    let title = match title.trim() {
        "" => DEFAULT_DESIGN_TITLE,
        trimmed => trimmed,
    };

    let settings = snapshot
        .modules
        .first()
        .map(|module| DesignSettings {
            material: module.material.clone(),
            thickness: module
                .standard_thickness()
                .unwrap_or(DEFAULT_BOARD_THICKNESS_MM),
            ..DesignSettings::default()
        })
        .unwrap_or_default();

    DesignDocument {
        version: DOCUMENT_VERSION.to_string(),
        metadata: DesignMetadata {
            title: title.to_string(),
            created_at: now,
            updated_at: now,
            platform: PLATFORM_NAME.to_string(),
        },
        template: TemplateSection {
            modules: snapshot.modules.clone(),
        },
        boards: snapshot.free_boards.clone(),
        settings,
    }
}

/// Result of reading a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDesign {
    /// Module section, `None` when absent or malformed
    pub template: Option<TemplateSection>,
    /// Valid free boards; malformed entries are dropped
    pub boards: Vec<FreeBoard>,
    /// Raw metadata object
    pub metadata: Map<String, Value>,
    /// Raw settings object
    pub settings: Map<String, Value>,
    /// Declared schema version
    pub version: Option<String>,
}

impl ParsedDesign {
    /// Title from the metadata, if present and a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }

    /// True if nothing usable was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template
            .as_ref()
            .map_or(true, |t| t.modules.is_empty())
            && self.boards.is_empty()
    }

    /// Converts into a snapshot. A missing template yields no modules.
    #[must_use]
    pub fn into_snapshot(self) -> DesignSnapshot {
        DesignSnapshot {
            modules: self.template.map(|t| t.modules).unwrap_or_default(),
            free_boards: self.boards,
        }
    }
}

fn field<'a>(object: &'a Map<String, Value>, name: &str, alias: &str) -> Option<&'a Value> {
    object
        .get(name)
        .filter(|v| !v.is_null())
        .or_else(|| object.get(alias).filter(|v| !v.is_null()))
}

/// Reads a document value. Never fails: anything that is not an object yields
/// an empty design.
#[must_use]
pub fn from_persistable(value: &Value) -> ParsedDesign {
    let Some(object) = value.as_object() else {
        debug!("design data is not an object, using empty design");
        return ParsedDesign::default();
    };

    let version = object
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_string);
    if version.as_deref() != Some(DOCUMENT_VERSION) {
        warn!(
            found = ?version,
            expected = DOCUMENT_VERSION,
            "design document version mismatch, reading best effort"
        );
    }

    let template = field(object, "template", "boxTemplate").and_then(|v| {
        serde_json::from_value::<TemplateSection>(v.clone())
            .map_err(|e| warn!("ignoring malformed template section: {e}"))
            .ok()
    });

    let boards = match field(object, "boards", "independentBoards") {
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                serde_json::from_value::<FreeBoard>(entry.clone())
                    .map_err(|e| warn!(index, "skipping malformed board entry: {e}"))
                    .ok()
            })
            .collect(),
        Some(_) => {
            warn!("boards section is not an array, ignoring");
            Vec::new()
        }
        None => Vec::new(),
    };

    let object_field = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    };

    ParsedDesign {
        template,
        boards,
        metadata: object_field("metadata"),
        settings: object_field("settings"),
        version,
    }
}

/// Parses document text. Invalid JSON yields `None`.
#[must_use]
pub fn parse_str(text: &str) -> Option<ParsedDesign> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Some(from_persistable(&value)),
        Err(e) => {
            warn!("design data is not valid JSON: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Orientation, Vec3};
    use crate::services::ComponentRegistry;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_snapshot() -> DesignSnapshot {
        let mut registry = ComponentRegistry::default();
        let id = registry.add_module(Vec3::ZERO).id;
        registry.add_support(id, 20.0, 0.0);
        registry.add_shelf(id, 90.0);
        registry.add_free_board(Orientation::Vertical, Vec3::new(120.0, 0.0, 0.0));
        registry.snapshot()
    }

    #[test]
    fn test_document_shape() {
        let now = Utc.with_ymd_and_hms(2025, 1, 21, 12, 0, 0).unwrap();
        let document = to_persistable_at(&sample_snapshot(), "  Hallway  ", now);
        let value = document.to_value().unwrap();

        assert_eq!(value["version"], "1.0");
        assert_eq!(value["metadata"]["title"], "Hallway");
        assert_eq!(value["metadata"]["platform"], "Shelf Designer v1.0");
        assert_eq!(value["metadata"]["createdAt"], "2025-01-21T12:00:00Z");
        assert_eq!(
            value["settings"],
            json!({"units": "cm", "material": "pine", "thickness": 18.0})
        );
        assert_eq!(value["template"]["modules"].as_array().unwrap().len(), 1);
        assert_eq!(value["boards"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_blank_title_uses_default() {
        let document = to_persistable(&DesignSnapshot::default(), "   ");
        assert_eq!(document.title(), DEFAULT_DESIGN_TITLE);
    }

    #[test]
    fn test_round_trip_preserves_components() {
        let snapshot = sample_snapshot();
        let value = to_persistable(&snapshot, "Round trip").to_value().unwrap();
        let parsed = from_persistable(&value);

        assert_eq!(parsed.title(), Some("Round trip"));
        assert_eq!(parsed.version.as_deref(), Some("1.0"));
        assert_eq!(parsed.into_snapshot(), snapshot);
    }

    #[test]
    fn test_non_object_yields_empty_design() {
        for value in [Value::Null, json!(42), json!("text"), json!([1, 2])] {
            let parsed = from_persistable(&value);
            assert_eq!(parsed, ParsedDesign::default());
            assert!(parsed.is_empty());
        }
    }

    #[test]
    fn test_partial_document_defaults_independently() {
        let parsed = from_persistable(&json!({"metadata": {"title": "Only a title"}}));
        assert!(parsed.template.is_none());
        assert!(parsed.boards.is_empty());
        assert!(parsed.settings.is_empty());
        assert_eq!(parsed.title(), Some("Only a title"));
        assert_eq!(parsed.version, None);
    }

    #[test]
    fn test_legacy_field_names_accepted() {
        let snapshot = sample_snapshot();
        let mut value = to_persistable(&snapshot, "Legacy").to_value().unwrap();
        let object = value.as_object_mut().unwrap();
        let template = object.remove("template").unwrap();
        let boards = object.remove("boards").unwrap();
        object.insert("boxTemplate".to_string(), template);
        object.insert("independentBoards".to_string(), boards);
        object.insert("version".to_string(), json!("0.9"));

        let parsed = from_persistable(&value);
        assert_eq!(parsed.version.as_deref(), Some("0.9"));
        assert_eq!(parsed.into_snapshot(), snapshot);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let value = json!({
            "template": "not a template",
            "boards": [
                {"id": 1, "position": {"x": 0, "y": 0, "z": 0},
                 "dimensions": {"length": 60, "width": 30, "thickness": 18},
                 "material": "pine", "enabled": true},
                {"id": "bogus"}
            ]
        });
        let parsed = from_persistable(&value);
        assert!(parsed.template.is_none());
        assert_eq!(parsed.boards.len(), 1);
        assert_eq!(parsed.boards[0].id, 1);
    }

    #[test]
    fn test_parse_str_rejects_invalid_json() {
        assert!(parse_str("{not json").is_none());
        assert!(parse_str("null").is_some_and(|p| p.is_empty()));
    }
}
