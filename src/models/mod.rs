//! Data models for box modules, boards, dividers and design snapshots.
//!
//! This module contains the parametric data structures used throughout the application.
//! Models hold no rendering state and no business logic beyond simple derived values.

pub mod board;
pub mod design;
pub mod divider;
pub mod free_board;
pub mod history;
pub mod material;
pub mod module;
pub mod space;

// Re-export all model types
pub use board::{Board, BoardId, BoardSet, BoardType};
pub use design::DesignSnapshot;
pub use divider::{Shelf, ShelfDimension, ShelfId, Support, SupportId, SupportPosition};
pub use free_board::{FreeBoard, FreeBoardDimension, FreeBoardDimensions, FreeBoardId, Orientation};
pub use history::{DeletedComponent, DeletedComponentRecord, DeletedKind};
pub use material::{Material, MaterialProperties};
pub use module::{BoxModule, ModuleId};
pub use space::{Axis, Bounds, Dimension, PositionPatch, Size3, SizePatch, Vec3};
