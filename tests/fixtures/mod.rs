//! Shared test fixtures for E2E CLI and API tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use chrono::{TimeZone, Utc};
use serde_json::Value;
use shelf_designer::config::DefaultsConfig;
use shelf_designer::models::{Dimension, Orientation, SizePatch, Vec3};
use shelf_designer::persistence::document::to_persistable_at;
use shelf_designer::persistence::DesignDocument;
use shelf_designer::services::{ComponentRegistry, Template};
use std::fs;
use std::path::{Path, PathBuf};

/// Builds a design document from a template with deterministic timestamps.
pub fn template_document(template: Template, title: &str) -> DesignDocument {
    let mut registry = ComponentRegistry::new(DefaultsConfig::default());
    template.expand(&mut registry);
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    to_persistable_at(&registry.snapshot(), title, now)
}

/// A single default module: rated "warning" (tall relative to its depth).
pub fn basic_design_json() -> Value {
    template_document(Template::Single, "Test Shelf")
        .to_value()
        .unwrap()
}

/// A tall, narrow module that tips over: rated "danger".
pub fn unsafe_design_json() -> Value {
    let mut registry = ComponentRegistry::new(DefaultsConfig::default());
    let id = registry.add_module(Vec3::ZERO).id;
    registry.set_module_size(
        id,
        SizePatch {
            width: Some(30.0),
            height: Some(200.0),
            depth: Some(30.0),
        },
    );
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    to_persistable_at(&registry.snapshot(), "Tower", now)
        .to_value()
        .unwrap()
}

/// A squat module with a support, a shelf and a free board: rated "safe".
pub fn furnished_design_json() -> Value {
    let mut registry = ComponentRegistry::new(DefaultsConfig::default());
    let id = registry.add_module(Vec3::ZERO).id;
    registry.set_module_size(id, SizePatch::only(Dimension::Height, 80.0));
    registry.add_support(id, 0.0, 0.0);
    registry.add_shelf(id, 40.0);
    registry.add_free_board(Orientation::Horizontal, Vec3::new(100.0, 0.0, 0.0));
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    to_persistable_at(&registry.snapshot(), "Low Shelf", now)
        .to_value()
        .unwrap()
}

/// Writes a design value as pretty JSON and returns its path.
pub fn write_design_file(dir: &Path, name: &str, design: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(design).unwrap())
        .expect("Failed to write design file");
    path
}
