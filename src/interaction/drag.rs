//! Module drag protocol.

use crate::models::{ModuleId, Vec3};

/// A point in screen pixels (Y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate
    pub y: f64,
}

impl ScreenPoint {
    /// Creates a screen point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An in-progress module drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Module being dragged
    pub module_id: ModuleId,
    /// Pointer position at pointer-down
    pub start_pointer: ScreenPoint,
    /// Module position at pointer-down
    pub start_position: Vec3,
    /// Set once the pointer has actually moved
    pub moved: bool,
}

impl DragState {
    /// Position for the current pointer location.
    #[must_use]
    pub fn position_at(&self, pointer: ScreenPoint, sensitivity: f64) -> Vec3 {
        module_drag_position(
            self.start_position,
            pointer.x - self.start_pointer.x,
            pointer.y - self.start_pointer.y,
            sensitivity,
        )
    }
}

/// Reported when a drag ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFinished {
    /// Module that was dragged
    pub module_id: ModuleId,
    /// Its final position
    pub position: Vec3,
    /// False when the pointer never moved
    pub moved: bool,
}

/// Whole-module drag: screen X drives X, screen Y drives Y (inverted), Z stays.
///
/// Y is clamped so modules never go below the floor plane. Boards are never
/// pointer-dragged on their own; they are placed through numeric edits.
#[must_use]
pub fn module_drag_position(start: Vec3, dx: f64, dy: f64, sensitivity: f64) -> Vec3 {
    Vec3::new(
        start.x + dx * sensitivity,
        (start.y - dy * sensitivity).max(0.0),
        start.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_up_and_right() {
        let p = module_drag_position(Vec3::ZERO, 10.0, -10.0, 0.1);
        assert!((p.x - 1.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_drag_clamps_to_floor() {
        let p = module_drag_position(Vec3::new(0.0, 2.0, 5.0), 0.0, 100.0, 0.1);
        assert_eq!(p, Vec3::new(0.0, 0.0, 5.0));
    }
}
