//! Rendering boundary.
//!
//! The core never holds rendering objects. It talks to a [`ViewportAdapter`]
//! through opaque [`RenderHandle`]s, and [`SceneSync`] keeps the mapping from
//! component ids to handles in step with registry change notifications.

pub mod scene;
pub mod sync;

use serde::{Deserialize, Serialize};

use crate::models::{Bounds, ModuleId, Vec3};
use crate::services::geometry::{ComponentGeometry, ComponentKind};

pub use scene::{HeadlessScene, ViewTransform};
pub use sync::SceneSync;

/// Opaque handle to a drawable registered with a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderHandle(pub u64);

/// Nearest component under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitResult {
    /// Id of the component within its namespace
    pub logical_id: u32,
    /// Logical type of the component
    pub kind: ComponentKind,
    /// Owning module, if any
    pub box_id: Option<ModuleId>,
}

/// What the core needs from a renderer.
pub trait ViewportAdapter {
    /// Registers a drawable for a component whose owner sits at `origin`.
    fn render_component(&mut self, geometry: &ComponentGeometry, origin: Vec3) -> RenderHandle;

    /// Disposes a drawable. Unknown handles are ignored.
    fn remove_component(&mut self, handle: RenderHandle);

    /// Nearest hit under the pointer, ignoring anything occluded behind it.
    fn hit_test(&self, pointer_x: f64, pointer_y: f64) -> Option<HitResult>;

    /// World bounds enclosing the given drawables.
    fn compute_union_bounds(&self, handles: &[RenderHandle]) -> Option<Bounds>;
}
