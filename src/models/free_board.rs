//! Free-standing boards that belong to no module.

use serde::{Deserialize, Serialize};

use super::space::{Axis, Vec3};
use crate::constants::{
    DEFAULT_BOARD_THICKNESS_MM, DEFAULT_FREE_BOARD_LENGTH, DEFAULT_FREE_BOARD_WIDTH,
    DEFAULT_MATERIAL,
};

/// Identifier of a free board (own namespace).
pub type FreeBoardId = u32;

/// How a free board is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Lying flat; length is the longer side
    #[default]
    Horizontal,
    /// Standing upright; rotated 90 degrees about Y
    Vertical,
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(format!("Unknown orientation: {other}")),
        }
    }
}

/// Which free board dimension an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreeBoardDimension {
    /// Long side (cm)
    Length,
    /// Short side (cm)
    Width,
    /// Thickness (mm)
    Thickness,
}

/// Dimensions of a free board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeBoardDimensions {
    /// Length in centimeters
    pub length: f64,
    /// Width in centimeters
    pub width: f64,
    /// Thickness in millimeters
    pub thickness: f64,
}

/// A board placed directly in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeBoard {
    /// Unique free board id
    pub id: FreeBoardId,
    /// Layout orientation
    #[serde(default)]
    pub orientation: Orientation,
    /// World position of the board center (cm)
    pub position: Vec3,
    /// Board dimensions
    pub dimensions: FreeBoardDimensions,
    /// Rotation in degrees, each axis in [0, 360)
    #[serde(default)]
    pub rotation: Vec3,
    /// Material name
    #[serde(default = "default_material")]
    pub material: String,
    /// Whether the board is built
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_material() -> String {
    DEFAULT_MATERIAL.to_string()
}

const fn default_enabled() -> bool {
    true
}

impl FreeBoard {
    /// Creates a free board with default dimensions.
    #[must_use]
    pub fn new(id: FreeBoardId, orientation: Orientation, position: Vec3) -> Self {
        let rotation = match orientation {
            Orientation::Horizontal => Vec3::ZERO,
            Orientation::Vertical => Vec3::new(0.0, 90.0, 0.0),
        };
        Self {
            id,
            orientation,
            position,
            dimensions: FreeBoardDimensions {
                length: DEFAULT_FREE_BOARD_LENGTH,
                width: DEFAULT_FREE_BOARD_WIDTH,
                thickness: DEFAULT_BOARD_THICKNESS_MM,
            },
            rotation,
            material: default_material(),
            enabled: true,
        }
    }

    /// Changes orientation, putting the longer side in `length` when horizontal
    /// and the shorter side when vertical.
    pub fn reorient(&mut self, orientation: Orientation) {
        let FreeBoardDimensions { length, width, .. } = self.dimensions;
        let (long, short) = (length.max(width), length.min(width));
        match orientation {
            Orientation::Horizontal => {
                self.dimensions.length = long;
                self.dimensions.width = short;
                self.rotation = Vec3::ZERO;
            }
            Orientation::Vertical => {
                self.dimensions.length = short;
                self.dimensions.width = long;
                self.rotation = Vec3::new(0.0, 90.0, 0.0);
            }
        }
        self.orientation = orientation;
    }

    /// Sets the rotation about one axis, normalized to [0, 360).
    pub fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.rotation = self.rotation.with(axis, degrees.rem_euclid(360.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_board_is_rotated() {
        let board = FreeBoard::new(1, Orientation::Vertical, Vec3::ZERO);
        assert_eq!(board.rotation, Vec3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn test_reorient_swaps_long_side() {
        let mut board = FreeBoard::new(1, Orientation::Horizontal, Vec3::ZERO);
        board.dimensions.length = 30.0;
        board.dimensions.width = 90.0;
        board.reorient(Orientation::Horizontal);
        assert_eq!(board.dimensions.length, 90.0);
        assert_eq!(board.dimensions.width, 30.0);

        board.reorient(Orientation::Vertical);
        assert_eq!(board.dimensions.length, 30.0);
        assert_eq!(board.orientation, Orientation::Vertical);
    }

    #[test]
    fn test_rotate_normalizes() {
        let mut board = FreeBoard::new(1, Orientation::Horizontal, Vec3::ZERO);
        board.rotate(Axis::Y, -90.0);
        assert_eq!(board.rotation.y, 270.0);
        board.rotate(Axis::X, 450.0);
        assert_eq!(board.rotation.x, 90.0);
    }
}
