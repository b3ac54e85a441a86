//! Internal dividers: vertical supports and horizontal shelves.

use serde::{Deserialize, Serialize};

use super::ModuleId;

/// Identifier of a support (own namespace).
pub type SupportId = u32;

/// Identifier of a shelf (own namespace).
pub type ShelfId = u32;

/// Horizontal placement of a support relative to the module origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SupportPosition {
    /// Offset along X (cm)
    pub x: f64,
    /// Offset along Z (cm)
    pub z: f64,
}

/// A full-height vertical divider inside a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Support {
    /// Unique support id
    pub id: SupportId,
    /// Owning module (lookup only)
    pub box_id: ModuleId,
    /// Placement inside the module
    pub position: SupportPosition,
    /// Thickness in millimeters
    pub thickness: f64,
    /// Horizontal extent along Z in centimeters
    pub width: f64,
    /// Whether the support is built
    pub enabled: bool,
}

/// Which shelf dimension an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelfDimension {
    /// Extent along X
    Width,
    /// Extent along Z
    Depth,
}

/// A horizontal divider inside a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
    /// Unique shelf id
    pub id: ShelfId,
    /// Owning module (lookup only)
    pub box_id: ModuleId,
    /// Offset (cm) from the module's local origin; not clamped to the module height
    pub height: f64,
    /// Thickness in millimeters
    pub thickness: f64,
    /// Width override; defaults to module width minus the inset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Depth override; defaults to module depth minus the inset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    /// Whether the shelf is built
    pub enabled: bool,
}

impl Shelf {
    /// Width and depth this shelf is built with inside a module of the given width/depth.
    #[must_use]
    pub fn effective_extent(&self, module_width: f64, module_depth: f64) -> (f64, f64) {
        (
            self.width
                .unwrap_or(module_width - crate::constants::SHELF_INSET),
            self.depth
                .unwrap_or(module_depth - crate::constants::SHELF_INSET),
        )
    }
}
