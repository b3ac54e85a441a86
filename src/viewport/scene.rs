//! In-memory viewport with an orthographic front camera.
//!
//! Used by the CLI and tests in place of a GPU renderer. The camera looks
//! down the -Z axis, so the nearest hit is the drawable with the largest
//! front face Z under the pointer.

use std::collections::BTreeMap;

use super::{HitResult, RenderHandle, ViewportAdapter};
use crate::models::{Bounds, Vec3};
use crate::services::geometry::ComponentGeometry;

/// Maps screen pixels to world centimeters for the front view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Pixels per centimeter
    pub scale: f64,
    /// Screen X of the world origin
    pub origin_x: f64,
    /// Screen Y of the world origin (screen Y grows downwards)
    pub origin_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Converts a screen point to world (x, y).
    #[must_use]
    pub fn to_world(&self, pointer_x: f64, pointer_y: f64) -> (f64, f64) {
        (
            (pointer_x - self.origin_x) / self.scale,
            (self.origin_y - pointer_y) / self.scale,
        )
    }

    /// Converts world (x, y) to a screen point.
    #[must_use]
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }
}

#[derive(Debug, Clone)]
struct Drawable {
    bounds: Bounds,
    hit: HitResult,
}

/// A scene graph that only tracks bounds.
#[derive(Debug, Clone, Default)]
pub struct HeadlessScene {
    view: ViewTransform,
    drawables: BTreeMap<RenderHandle, Drawable>,
    next_handle: u64,
}

impl HeadlessScene {
    /// Creates an empty scene with the given camera mapping.
    #[must_use]
    pub fn new(view: ViewTransform) -> Self {
        Self {
            view,
            drawables: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Camera mapping.
    #[must_use]
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Number of live drawables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// True when nothing is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// World bounds of a drawable.
    #[must_use]
    pub fn bounds(&self, handle: RenderHandle) -> Option<Bounds> {
        self.drawables.get(&handle).map(|d| d.bounds)
    }
}

impl ViewportAdapter for HeadlessScene {
    fn render_component(&mut self, geometry: &ComponentGeometry, origin: Vec3) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        self.drawables.insert(
            handle,
            Drawable {
                bounds: geometry.world_bounds(origin),
                hit: HitResult {
                    logical_id: geometry.id,
                    kind: geometry.kind,
                    box_id: geometry.box_id,
                },
            },
        );
        handle
    }

    fn remove_component(&mut self, handle: RenderHandle) {
        self.drawables.remove(&handle);
    }

    fn hit_test(&self, pointer_x: f64, pointer_y: f64) -> Option<HitResult> {
        let (x, y) = self.view.to_world(pointer_x, pointer_y);
        let mut nearest: Option<&Drawable> = None;
        for drawable in self.drawables.values() {
            if !drawable.bounds.contains_xy(x, y) {
                continue;
            }
            if nearest.map_or(true, |n| drawable.bounds.max.z > n.bounds.max.z) {
                nearest = Some(drawable);
            }
        }
        nearest.map(|d| d.hit)
    }

    fn compute_union_bounds(&self, handles: &[RenderHandle]) -> Option<Bounds> {
        handles
            .iter()
            .filter_map(|h| self.bounds(*h))
            .reduce(Bounds::union)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoardType;
    use crate::services::geometry::ComponentKind;

    fn slab(id: u32, kind: ComponentKind, position: Vec3, extent: Vec3) -> ComponentGeometry {
        ComponentGeometry {
            kind,
            id,
            box_id: Some(1),
            extent,
            position,
            rotation: Vec3::ZERO,
        }
    }

    #[test]
    fn test_hit_test_returns_nearest_only() {
        let mut scene = HeadlessScene::new(ViewTransform::default());
        let back = slab(
            1,
            ComponentKind::Board(BoardType::Back),
            Vec3::new(0.0, 50.0, -10.0),
            Vec3::new(100.0, 100.0, 2.0),
        );
        let shelf = slab(
            7,
            ComponentKind::Shelf,
            Vec3::new(0.0, 50.0, 0.0),
            Vec3::new(80.0, 2.0, 30.0),
        );
        scene.render_component(&back, Vec3::ZERO);
        scene.render_component(&shelf, Vec3::ZERO);

        let hit = scene.hit_test(0.0, -50.0).unwrap();
        assert_eq!(hit.kind, ComponentKind::Shelf);
        assert_eq!(hit.logical_id, 7);

        let hit = scene.hit_test(0.0, -80.0).unwrap();
        assert_eq!(hit.kind, ComponentKind::Board(BoardType::Back));

        assert!(scene.hit_test(500.0, 0.0).is_none());
    }

    #[test]
    fn test_remove_and_union_bounds() {
        let mut scene = HeadlessScene::new(ViewTransform::default());
        let a = scene.render_component(
            &slab(1, ComponentKind::Support, Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0)),
            Vec3::ZERO,
        );
        let b = scene.render_component(
            &slab(2, ComponentKind::Support, Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0)),
            Vec3::new(10.0, 0.0, 0.0),
        );

        let bounds = scene.compute_union_bounds(&[a, b]).unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(11.0, 1.0, 1.0));

        scene.remove_component(a);
        scene.remove_component(a);
        assert_eq!(scene.len(), 1);
        assert!(scene.compute_union_bounds(&[a]).is_none());
    }

    #[test]
    fn test_view_transform_roundtrip() {
        let view = ViewTransform {
            scale: 2.0,
            origin_x: 400.0,
            origin_y: 600.0,
        };
        let (sx, sy) = view.to_screen(10.0, 20.0);
        assert_eq!((sx, sy), (420.0, 560.0));
        assert_eq!(view.to_world(sx, sy), (10.0, 20.0));
    }
}
