//! The box module: the top-level placeable unit of a design.

use serde::{Deserialize, Serialize};

use super::board::{Board, BoardId, BoardSet, BoardType};
use super::divider::{Shelf, ShelfId, Support, SupportId};
use super::space::{Size3, Vec3};
use crate::constants::DEFAULT_MATERIAL;

/// Identifier of a module (own namespace).
pub type ModuleId = u32;

/// A box-shaped shelving unit that exclusively owns its boards, supports and shelves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxModule {
    /// Unique module id
    pub id: ModuleId,
    /// Placement origin (bottom-center-back convention), cm
    pub position: Vec3,
    /// Bounding envelope, cm
    pub size: Size3,
    /// Material name used for the module's panels
    #[serde(default = "default_material")]
    pub material: String,
    /// The five board slots
    #[serde(default)]
    pub boards: BoardSet,
    /// Vertical dividers in insertion order
    #[serde(default)]
    pub supports: Vec<Support>,
    /// Horizontal dividers in insertion order
    #[serde(default)]
    pub shelves: Vec<Shelf>,
}

fn default_material() -> String {
    DEFAULT_MATERIAL.to_string()
}

impl BoxModule {
    /// Looks up a board by id.
    #[must_use]
    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    /// Looks up a board by id, mutably.
    pub fn board_mut(&mut self, id: BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| b.id == id)
    }

    /// Looks up a board by slot.
    #[must_use]
    pub fn board_of_type(&self, board_type: BoardType) -> Option<&Board> {
        self.boards.get(board_type)
    }

    /// Looks up a support by id.
    #[must_use]
    pub fn support(&self, id: SupportId) -> Option<&Support> {
        self.supports.iter().find(|s| s.id == id)
    }

    /// Looks up a shelf by id.
    #[must_use]
    pub fn shelf(&self, id: ShelfId) -> Option<&Shelf> {
        self.shelves.iter().find(|s| s.id == id)
    }

    /// Thickness the module is nominally built from: the thinnest enabled board.
    #[must_use]
    pub fn standard_thickness(&self) -> Option<f64> {
        self.boards
            .enabled()
            .map(|b| b.thickness)
            .reduce(f64::min)
    }

    /// Largest id used by any of the module's boards.
    #[must_use]
    pub fn max_board_id(&self) -> BoardId {
        self.boards.iter().map(|b| b.id).max().unwrap_or(0)
    }
}
