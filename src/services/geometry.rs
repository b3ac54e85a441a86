//! Geometry building service.
//!
//! Pure functions mapping the parametric description of modules, dividers and
//! free boards to box descriptors (extent, local position, rotation) that a
//! viewport can render. Nothing here keeps state; callers rebuild a whole
//! module's descriptors whenever anything inside it changes.

use serde::{Deserialize, Serialize};

use crate::models::{
    BoardType, Bounds, BoxModule, FreeBoard, ModuleId, Vec3,
};

/// Logical type of a rendered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "boardType", rename_all = "camelCase")]
pub enum ComponentKind {
    /// One of the five module boards
    Board(BoardType),
    /// Vertical divider
    Support,
    /// Horizontal divider
    Shelf,
    /// Board that belongs to no module
    FreeBoard,
}

/// A renderable box derived from parametric fields. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentGeometry {
    /// Logical type of the source component
    pub kind: ComponentKind,
    /// Id of the source component within its namespace
    pub id: u32,
    /// Owning module, if any
    pub box_id: Option<ModuleId>,
    /// Full box extent along X, Y and Z (cm)
    pub extent: Vec3,
    /// Box center relative to the owner's origin (module position, or world for free boards)
    pub position: Vec3,
    /// Euler rotation (radians, XYZ order)
    pub rotation: Vec3,
}

impl ComponentGeometry {
    /// World-space axis-aligned bounds when the owner sits at `origin`.
    #[must_use]
    pub fn world_bounds(&self, origin: Vec3) -> Bounds {
        let half = Vec3::new(self.extent.x / 2.0, self.extent.y / 2.0, self.extent.z / 2.0);
        let half = if self.rotation == Vec3::ZERO {
            half
        } else {
            rotated_half_extent(half, self.rotation)
        };
        Bounds::from_center(origin.add(self.position), half)
    }
}

/// Half extent of the axis-aligned box enclosing a rotated box.
fn rotated_half_extent(half: Vec3, rotation: Vec3) -> Vec3 {
    let (b, a) = rotation.x.sin_cos();
    let (d, c) = rotation.y.sin_cos();
    let (f, e) = rotation.z.sin_cos();

    let m = [
        [c * e, -c * f, d],
        [a * f + b * e * d, a * e - b * f * d, -b * c],
        [b * f - a * e * d, b * e + a * f * d, a * c],
    ];
    let row = |r: [f64; 3]| r[0].abs() * half.x + r[1].abs() * half.y + r[2].abs() * half.z;

    Vec3::new(row(m[0]), row(m[1]), row(m[2]))
}

/// Builds descriptors for every enabled board, support and shelf of a module.
///
/// Extents use each board's effective size (individual override first, module
/// size second), while positions always use the module's own size. A resized
/// board therefore stays anchored in the module frame and may leave a gap.
#[must_use]
pub fn build_module_geometry(module: &BoxModule) -> Vec<ComponentGeometry> {
    let size = module.size;
    let mut out = Vec::new();

    for board in module.boards.enabled() {
        let eff = board.effective_size(size);
        let t = board.thickness / 10.0;

        let (extent, position) = match board.board_type {
            BoardType::Top => (
                Vec3::new(eff.width, t, eff.depth),
                Vec3::new(0.0, size.height - t / 2.0, 0.0),
            ),
            BoardType::Bottom => (
                Vec3::new(eff.width, t, eff.depth),
                Vec3::new(0.0, t / 2.0, 0.0),
            ),
            BoardType::Left => (
                Vec3::new(t, eff.height, eff.depth),
                Vec3::new(-size.width / 2.0 + t / 2.0, size.height / 2.0, 0.0),
            ),
            BoardType::Right => (
                Vec3::new(t, eff.height, eff.depth),
                Vec3::new(size.width / 2.0 - t / 2.0, size.height / 2.0, 0.0),
            ),
            BoardType::Back => (
                Vec3::new(eff.width, eff.height, t),
                Vec3::new(0.0, size.height / 2.0, -size.depth / 2.0 + t / 2.0),
            ),
        };

        out.push(ComponentGeometry {
            kind: ComponentKind::Board(board.board_type),
            id: board.id,
            box_id: Some(module.id),
            extent,
            position,
            rotation: Vec3::ZERO,
        });
    }

    for support in module.supports.iter().filter(|s| s.enabled) {
        out.push(ComponentGeometry {
            kind: ComponentKind::Support,
            id: support.id,
            box_id: Some(module.id),
            extent: Vec3::new(support.thickness / 10.0, size.height, support.width),
            position: Vec3::new(support.position.x, size.height / 2.0, support.position.z),
            rotation: Vec3::ZERO,
        });
    }

    for shelf in module.shelves.iter().filter(|s| s.enabled) {
        let (width, depth) = shelf.effective_extent(size.width, size.depth);
        out.push(ComponentGeometry {
            kind: ComponentKind::Shelf,
            id: shelf.id,
            box_id: Some(module.id),
            extent: Vec3::new(width, shelf.thickness / 10.0, depth),
            position: Vec3::new(0.0, shelf.height, 0.0),
            rotation: Vec3::ZERO,
        });
    }

    out
}

/// Builds the descriptor of a free board, or `None` when it is disabled.
#[must_use]
pub fn build_free_board_geometry(board: &FreeBoard) -> Option<ComponentGeometry> {
    if !board.enabled {
        return None;
    }
    let dims = board.dimensions;
    Some(ComponentGeometry {
        kind: ComponentKind::FreeBoard,
        id: board.id,
        box_id: None,
        extent: Vec3::new(dims.length, dims.thickness / 10.0, dims.width),
        position: board.position,
        rotation: Vec3::new(
            board.rotation.x.to_radians(),
            board.rotation.y.to_radians(),
            board.rotation.z.to_radians(),
        ),
    })
}

/// Union of the world bounds of a module's descriptors.
#[must_use]
pub fn module_world_bounds(module: &BoxModule, geometry: &[ComponentGeometry]) -> Option<Bounds> {
    geometry
        .iter()
        .map(|g| g.world_bounds(module.position))
        .reduce(Bounds::union)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Board, BoardSet, Dimension, Orientation, Shelf, Size3, Support, SupportPosition,
    };

    fn default_module() -> BoxModule {
        let mut boards = BoardSet::default();
        for (i, t) in BoardType::ALL.into_iter().enumerate() {
            boards.insert(Board::new(i as u32 + 1, 1, t, 18.0));
        }
        BoxModule {
            id: 1,
            position: Vec3::ZERO,
            size: Size3::new(80.0, 180.0, 35.0),
            material: "pine".to_string(),
            boards,
            supports: Vec::new(),
            shelves: Vec::new(),
        }
    }

    fn find(geometry: &[ComponentGeometry], kind: ComponentKind) -> ComponentGeometry {
        *geometry.iter().find(|g| g.kind == kind).unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_one_entry_per_enabled_board() {
        let mut module = default_module();
        assert_eq!(build_module_geometry(&module).len(), 5);

        module.boards.get_mut(BoardType::Back).unwrap().enabled = false;
        let geometry = build_module_geometry(&module);
        assert_eq!(geometry.len(), 4);
        assert!(geometry
            .iter()
            .all(|g| g.kind != ComponentKind::Board(BoardType::Back)));
    }

    #[test]
    fn test_board_positions_are_flush() {
        let geometry = build_module_geometry(&default_module());

        let top = find(&geometry, ComponentKind::Board(BoardType::Top));
        assert_close(top.position.y, 180.0 - 0.9);
        assert_eq!(top.extent, Vec3::new(80.0, 1.8, 35.0));

        let bottom = find(&geometry, ComponentKind::Board(BoardType::Bottom));
        assert_close(bottom.position.y, 0.9);

        let left = find(&geometry, ComponentKind::Board(BoardType::Left));
        assert_close(left.position.x, -40.0 + 0.9);
        assert_close(left.position.y, 90.0);
        assert_eq!(left.extent, Vec3::new(1.8, 180.0, 35.0));

        let right = find(&geometry, ComponentKind::Board(BoardType::Right));
        assert_close(right.position.x, 40.0 - 0.9);

        let back = find(&geometry, ComponentKind::Board(BoardType::Back));
        assert_close(back.position.z, -17.5 + 0.9);
        assert_eq!(back.extent, Vec3::new(80.0, 180.0, 1.8));
    }

    #[test]
    fn test_individual_size_changes_extent_not_position() {
        let mut module = default_module();
        let size = module.size;
        module
            .boards
            .get_mut(BoardType::Left)
            .unwrap()
            .set_individual_dimension(size, Dimension::Height, 100.0);

        let left = find(
            &build_module_geometry(&module),
            ComponentKind::Board(BoardType::Left),
        );
        assert_close(left.extent.y, 100.0);
        assert_close(left.position.y, 90.0);
    }

    #[test]
    fn test_support_and_shelf_geometry() {
        let mut module = default_module();
        module.supports.push(Support {
            id: 1,
            box_id: 1,
            position: SupportPosition { x: 10.0, z: -5.0 },
            thickness: 18.0,
            width: 10.0,
            enabled: true,
        });
        module.shelves.push(Shelf {
            id: 1,
            box_id: 1,
            height: 250.0,
            thickness: 18.0,
            width: None,
            depth: Some(20.0),
            enabled: true,
        });

        let geometry = build_module_geometry(&module);
        let support = find(&geometry, ComponentKind::Support);
        assert_eq!(support.extent, Vec3::new(1.8, 180.0, 10.0));
        assert_eq!(support.position, Vec3::new(10.0, 90.0, -5.0));

        // Shelves are not clamped to the module height
        let shelf = find(&geometry, ComponentKind::Shelf);
        assert_eq!(shelf.extent, Vec3::new(78.0, 1.8, 20.0));
        assert_eq!(shelf.position, Vec3::new(0.0, 250.0, 0.0));
    }

    #[test]
    fn test_free_board_vertical_bounds_swap_x_and_z() {
        let board = FreeBoard::new(1, Orientation::Vertical, Vec3::new(0.0, 50.0, 0.0));
        let geometry = build_free_board_geometry(&board).unwrap();
        let bounds = geometry.world_bounds(Vec3::ZERO);

        // 60cm length now runs along Z, 30cm width along X
        assert_close(bounds.max.x - bounds.min.x, 30.0);
        assert_close(bounds.max.z - bounds.min.z, 60.0);
    }

    #[test]
    fn test_module_world_bounds_follow_position() {
        let mut module = default_module();
        module.position = Vec3::new(100.0, 0.0, 0.0);
        let geometry = build_module_geometry(&module);
        let bounds = module_world_bounds(&module, &geometry).unwrap();
        assert_close(bounds.min.x, 60.0);
        assert_close(bounds.max.x, 140.0);
        assert_close(bounds.max.y, 180.0);
    }
}
