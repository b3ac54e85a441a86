//! Keeps viewport drawables in step with the registry.

use std::collections::HashMap;

use super::{RenderHandle, ViewportAdapter};
use crate::models::{Bounds, FreeBoardId, ModuleId, Vec3};
use crate::services::registry::{ComponentRegistry, RegistryChange};

/// Arena of render handles keyed by component owner.
///
/// A module's drawables are always replaced as a whole, matching the
/// per-module rebuild granularity of the registry.
#[derive(Debug, Clone, Default)]
pub struct SceneSync {
    modules: HashMap<ModuleId, Vec<RenderHandle>>,
    free_boards: HashMap<FreeBoardId, RenderHandle>,
}

impl SceneSync {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies change notifications by disposing and re-creating drawables.
    pub fn apply<V: ViewportAdapter + ?Sized>(
        &mut self,
        changes: &[RegistryChange],
        registry: &ComponentRegistry,
        viewport: &mut V,
    ) {
        for change in changes {
            match *change {
                RegistryChange::ModuleRebuilt(id) | RegistryChange::ModuleMoved(id) => {
                    self.dispose_module(id, viewport);
                    if let (Some(module), Some(geometry)) =
                        (registry.module(id), registry.geometry(id))
                    {
                        let handles = geometry
                            .iter()
                            .map(|g| viewport.render_component(g, module.position))
                            .collect();
                        self.modules.insert(id, handles);
                    }
                }
                RegistryChange::ModuleRemoved(id) => self.dispose_module(id, viewport),
                RegistryChange::FreeBoardRebuilt(id) => {
                    self.dispose_free_board(id, viewport);
                    if let Some(geometry) = registry.free_board_geometry(id) {
                        let handle = viewport.render_component(geometry, Vec3::ZERO);
                        self.free_boards.insert(id, handle);
                    }
                }
                RegistryChange::FreeBoardRemoved(id) => self.dispose_free_board(id, viewport),
            }
        }
    }

    /// Handles currently drawn for a module.
    #[must_use]
    pub fn module_handles(&self, id: ModuleId) -> &[RenderHandle] {
        self.modules.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of live handles.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        self.modules.values().map(Vec::len).sum::<usize>() + self.free_boards.len()
    }

    /// Union of the drawn bounds of the given modules.
    pub fn union_bounds<V: ViewportAdapter + ?Sized>(
        &self,
        modules: &[ModuleId],
        viewport: &V,
    ) -> Option<Bounds> {
        let handles: Vec<_> = modules
            .iter()
            .flat_map(|id| self.module_handles(*id).iter().copied())
            .collect();
        viewport.compute_union_bounds(&handles)
    }

    fn dispose_module<V: ViewportAdapter + ?Sized>(&mut self, id: ModuleId, viewport: &mut V) {
        for handle in self.modules.remove(&id).unwrap_or_default() {
            viewport.remove_component(handle);
        }
    }

    fn dispose_free_board<V: ViewportAdapter + ?Sized>(
        &mut self,
        id: FreeBoardId,
        viewport: &mut V,
    ) {
        if let Some(handle) = self.free_boards.remove(&id) {
            viewport.remove_component(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoardType, Orientation, PositionPatch};
    use crate::viewport::{HeadlessScene, ViewTransform};

    fn sync(registry: &mut ComponentRegistry, scene: &mut HeadlessScene, arena: &mut SceneSync) {
        let changes = registry.take_changes();
        arena.apply(&changes, registry, scene);
    }

    #[test]
    fn test_rebuild_replaces_module_drawables() {
        let mut registry = ComponentRegistry::default();
        let mut scene = HeadlessScene::new(ViewTransform::default());
        let mut arena = SceneSync::new();

        let id = registry.add_module(Vec3::ZERO).id;
        sync(&mut registry, &mut scene, &mut arena);
        assert_eq!(scene.len(), 5);
        let first = arena.module_handles(id).to_vec();

        registry.toggle_board(id, BoardType::Top, false);
        sync(&mut registry, &mut scene, &mut arena);
        assert_eq!(scene.len(), 4);
        assert!(first.iter().all(|h| scene.bounds(*h).is_none()));

        registry.remove_module(id);
        sync(&mut registry, &mut scene, &mut arena);
        assert!(scene.is_empty());
        assert_eq!(arena.handle_count(), 0);
    }

    #[test]
    fn test_move_updates_bounds() {
        let mut registry = ComponentRegistry::default();
        let mut scene = HeadlessScene::new(ViewTransform::default());
        let mut arena = SceneSync::new();

        let id = registry.add_module(Vec3::ZERO).id;
        registry.set_module_position(id, PositionPatch { x: Some(100.0), y: None, z: None });
        sync(&mut registry, &mut scene, &mut arena);

        let bounds = arena.union_bounds(&[id], &scene).unwrap();
        assert!((bounds.min.x - 60.0).abs() < 1e-9);
        assert!((bounds.max.x - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_free_board_drawables() {
        let mut registry = ComponentRegistry::default();
        let mut scene = HeadlessScene::new(ViewTransform::default());
        let mut arena = SceneSync::new();

        let id = registry.add_free_board(Orientation::Horizontal, Vec3::ZERO).id;
        sync(&mut registry, &mut scene, &mut arena);
        assert_eq!(scene.len(), 1);

        registry.remove_free_board(id);
        sync(&mut registry, &mut scene, &mut arena);
        assert!(scene.is_empty());
    }
}
