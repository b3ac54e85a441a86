//! Component registry: the single source of truth for design state.
//!
//! The registry owns every box module (and through them their boards,
//! supports and shelves) plus the free-standing boards. It hands out ids from
//! separate monotonic counters, keeps the deleted-component history, and
//! rebuilds a module's geometry inline whenever something inside it changes.
//!
//! Lookups that miss are not errors: they log at debug level and return
//! `false`/`None`, since a miss only means the caller held a stale id.
//! Every visible change is queued as a [`RegistryChange`] which the viewport
//! side drains with [`ComponentRegistry::take_changes`].

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::config::DefaultsConfig;
use crate::models::{
    Axis, Board, BoardId, BoardSet, BoardType, Bounds, BoxModule, DeletedComponent,
    DeletedComponentRecord, DesignSnapshot, Dimension, FreeBoard, FreeBoardDimension,
    FreeBoardId, Material, ModuleId, Orientation, PositionPatch, Shelf, ShelfDimension, ShelfId,
    Size3, SizePatch, Support, SupportId, SupportPosition, Vec3,
};
use crate::services::geometry::{
    build_free_board_geometry, build_module_geometry, module_world_bounds, ComponentGeometry,
};

/// A change notification for the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryChange {
    /// A module was created or edited and its geometry rebuilt
    ModuleRebuilt(ModuleId),
    /// A module moved; its geometry is unchanged but its world bounds are not
    ModuleMoved(ModuleId),
    /// A module and all its children are gone
    ModuleRemoved(ModuleId),
    /// A free board was created or edited
    FreeBoardRebuilt(FreeBoardId),
    /// A free board is gone
    FreeBoardRemoved(FreeBoardId),
}

/// Result of applying a deleted-component record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The snapshot was reinstated
    Restored,
    /// A live component with the same id exists; nothing changed
    AlreadyLive,
    /// The owning module no longer exists; nothing changed
    OwnerMissing,
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Keeps the first component for each id in every namespace and drops the rest.
fn drop_duplicate_ids(modules: &mut Vec<BoxModule>, free_boards: &mut Vec<FreeBoard>) {
    let mut module_ids = HashSet::new();
    modules.retain(|m| {
        let fresh = module_ids.insert(m.id);
        if !fresh {
            warn!(module_id = m.id, "dropping module with duplicate id");
        }
        fresh
    });

    let mut board_ids = HashSet::new();
    let mut support_ids = HashSet::new();
    let mut shelf_ids = HashSet::new();
    for module in modules.iter_mut() {
        for board_type in BoardType::ALL {
            let Some(board_id) = module.boards.get(board_type).map(|b| b.id) else {
                continue;
            };
            if !board_ids.insert(board_id) {
                warn!(module_id = module.id, board_id, "dropping board with duplicate id");
                module.boards.remove(board_type);
            }
        }
        module.supports.retain(|s| {
            let fresh = support_ids.insert(s.id);
            if !fresh {
                warn!(support_id = s.id, "dropping support with duplicate id");
            }
            fresh
        });
        module.shelves.retain(|s| {
            let fresh = shelf_ids.insert(s.id);
            if !fresh {
                warn!(shelf_id = s.id, "dropping shelf with duplicate id");
            }
            fresh
        });
    }

    let mut free_board_ids = HashSet::new();
    free_boards.retain(|b| {
        let fresh = free_board_ids.insert(b.id);
        if !fresh {
            warn!(free_board_id = b.id, "dropping free board with duplicate id");
        }
        fresh
    });
}

/// Owns all design state and its derived geometry.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    defaults: DefaultsConfig,
    modules: Vec<BoxModule>,
    free_boards: Vec<FreeBoard>,
    history: Vec<DeletedComponentRecord>,
    geometry: HashMap<ModuleId, Vec<ComponentGeometry>>,
    free_geometry: HashMap<FreeBoardId, ComponentGeometry>,
    changes: Vec<RegistryChange>,
    next_module_id: ModuleId,
    next_board_id: BoardId,
    next_support_id: SupportId,
    next_shelf_id: ShelfId,
    next_free_board_id: FreeBoardId,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new(DefaultsConfig::default())
    }
}

impl ComponentRegistry {
    /// Creates an empty registry that builds new components from `defaults`.
    #[must_use]
    pub fn new(defaults: DefaultsConfig) -> Self {
        Self {
            defaults,
            modules: Vec::new(),
            free_boards: Vec::new(),
            history: Vec::new(),
            geometry: HashMap::new(),
            free_geometry: HashMap::new(),
            changes: Vec::new(),
            next_module_id: 1,
            next_board_id: 1,
            next_support_id: 1,
            next_shelf_id: 1,
            next_free_board_id: 1,
        }
    }

    /// Defaults used for new components.
    #[must_use]
    pub fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All modules in creation order.
    #[must_use]
    pub fn modules(&self) -> &[BoxModule] {
        &self.modules
    }

    /// Looks up a module.
    #[must_use]
    pub fn module(&self, id: ModuleId) -> Option<&BoxModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// All free boards in creation order.
    #[must_use]
    pub fn free_boards(&self) -> &[FreeBoard] {
        &self.free_boards
    }

    /// Looks up a free board.
    #[must_use]
    pub fn free_board(&self, id: FreeBoardId) -> Option<&FreeBoard> {
        self.free_boards.iter().find(|b| b.id == id)
    }

    /// Finds a module board by id together with its module.
    #[must_use]
    pub fn find_board(&self, id: BoardId) -> Option<(&BoxModule, &Board)> {
        self.modules
            .iter()
            .find_map(|m| m.board(id).map(|b| (m, b)))
    }

    /// Finds a support by id.
    #[must_use]
    pub fn find_support(&self, id: SupportId) -> Option<&Support> {
        self.modules.iter().find_map(|m| m.support(id))
    }

    /// Finds a shelf by id.
    #[must_use]
    pub fn find_shelf(&self, id: ShelfId) -> Option<&Shelf> {
        self.modules.iter().find_map(|m| m.shelf(id))
    }

    /// Deleted-component history, oldest first.
    #[must_use]
    pub fn deleted_components(&self) -> &[DeletedComponentRecord] {
        &self.history
    }

    /// Current geometry of a module, in module-local coordinates.
    #[must_use]
    pub fn geometry(&self, module_id: ModuleId) -> Option<&[ComponentGeometry]> {
        self.geometry.get(&module_id).map(Vec::as_slice)
    }

    /// Current geometry of a free board, in world coordinates.
    #[must_use]
    pub fn free_board_geometry(&self, id: FreeBoardId) -> Option<&ComponentGeometry> {
        self.free_geometry.get(&id)
    }

    /// World bounds of a module's built components.
    #[must_use]
    pub fn module_bounds(&self, module_id: ModuleId) -> Option<Bounds> {
        let module = self.module(module_id)?;
        module_world_bounds(module, self.geometry(module_id)?)
    }

    /// Detached copy of the whole design.
    #[must_use]
    pub fn snapshot(&self) -> DesignSnapshot {
        DesignSnapshot {
            modules: self.modules.clone(),
            free_boards: self.free_boards.clone(),
        }
    }

    /// Drains queued change notifications.
    pub fn take_changes(&mut self) -> Vec<RegistryChange> {
        std::mem::take(&mut self.changes)
    }

    // ========================================================================
    // Modules
    // ========================================================================

    /// Adds a module with the default size at `position`.
    pub fn add_module(&mut self, position: Vec3) -> &BoxModule {
        let size = self.defaults.module_size();
        self.add_module_sized(position, size)
    }

    /// Adds a module with an explicit size.
    ///
    /// All five boards are created enabled with the default thickness.
    pub fn add_module_sized(&mut self, position: Vec3, size: Size3) -> &BoxModule {
        let id = self.next_module_id;
        self.next_module_id += 1;

        let mut boards = BoardSet::default();
        for board_type in BoardType::ALL {
            let board_id = self.next_board_id;
            self.next_board_id += 1;
            boards.insert(Board::new(
                board_id,
                id,
                board_type,
                self.defaults.board_thickness,
            ));
        }

        self.modules.push(BoxModule {
            id,
            position,
            size,
            material: self.defaults.material.clone(),
            boards,
            supports: Vec::new(),
            shelves: Vec::new(),
        });
        debug!(module_id = id, "added module");
        self.rebuild(id);

        let index = self.modules.len() - 1;
        &self.modules[index]
    }

    /// Removes a module and everything it owns. Returns false if it was absent.
    pub fn remove_module(&mut self, id: ModuleId) -> bool {
        let Some(index) = self.modules.iter().position(|m| m.id == id) else {
            debug!(module_id = id, "remove_module: no such module");
            return false;
        };
        self.modules.remove(index);
        self.geometry.remove(&id);
        self.changes.push(RegistryChange::ModuleRemoved(id));
        debug!(module_id = id, "removed module");
        true
    }

    /// Merges the provided dimensions into a module's size and rebuilds it.
    ///
    /// Non-positive or non-finite values are ignored.
    pub fn set_module_size(&mut self, id: ModuleId, patch: SizePatch) -> bool {
        let mut valid = SizePatch::default();
        for dimension in Dimension::ALL {
            match patch.get(dimension) {
                Some(v) if is_positive(v) => valid.set(dimension, v),
                Some(v) => warn!(module_id = id, ?dimension, value = v, "ignoring invalid size"),
                None => {}
            }
        }
        if valid == SizePatch::default() {
            return false;
        }
        let Some(module) = self.modules.iter_mut().find(|m| m.id == id) else {
            debug!(module_id = id, "set_module_size: no such module");
            return false;
        };
        module.size.merge(&valid);
        self.rebuild(id);
        true
    }

    /// Merges the provided axes into a module's position.
    ///
    /// Geometry is not rebuilt; only the world bounds change.
    pub fn set_module_position(&mut self, id: ModuleId, patch: PositionPatch) -> bool {
        let Some(module) = self.modules.iter_mut().find(|m| m.id == id) else {
            debug!(module_id = id, "set_module_position: no such module");
            return false;
        };
        let position = patch.apply(module.position);
        if !position.is_finite() {
            warn!(module_id = id, "ignoring non-finite position");
            return false;
        }
        module.position = position;
        self.changes.push(RegistryChange::ModuleMoved(id));
        true
    }

    /// Sets a module's material. Unknown material names are rejected.
    pub fn set_module_material(&mut self, id: ModuleId, material: &str) -> bool {
        let Some(known) = Material::parse(material) else {
            warn!(module_id = id, material, "unknown material");
            return false;
        };
        let Some(module) = self.modules.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        module.material = known.as_str().to_string();
        self.rebuild(id);
        true
    }

    /// Applies one thickness (mm) to all five boards of a module.
    pub fn set_module_thickness(&mut self, id: ModuleId, thickness: f64) -> bool {
        if !is_positive(thickness) {
            return false;
        }
        let Some(module) = self.modules.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        for board in module.boards.iter_mut() {
            board.thickness = thickness;
        }
        self.rebuild(id);
        true
    }

    /// Restores the default size and re-enables every board.
    pub fn reset_module(&mut self, id: ModuleId) -> bool {
        let size = self.defaults.module_size();
        let Some(module) = self.modules.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        module.size = size;
        for board in module.boards.iter_mut() {
            board.enabled = true;
        }
        self.rebuild(id);
        true
    }

    // ========================================================================
    // Boards
    // ========================================================================

    /// Enables or disables a board. Returns true when the flag changed.
    ///
    /// Disabling records a full copy of the board in the history. Enabling
    /// only flips the flag back; the board keeps its fields either way.
    pub fn toggle_board(
        &mut self,
        module_id: ModuleId,
        board_type: BoardType,
        enabled: bool,
    ) -> bool {
        let Some(module) = self.modules.iter_mut().find(|m| m.id == module_id) else {
            debug!(module_id, "toggle_board: no such module");
            return false;
        };
        let Some(board) = module.boards.get_mut(board_type) else {
            return false;
        };
        if board.enabled == enabled {
            return false;
        }
        if !enabled {
            self.history.push(DeletedComponentRecord::now(
                module_id,
                DeletedComponent::Board(board.clone()),
            ));
        }
        board.enabled = enabled;
        debug!(module_id, %board_type, enabled, "toggled board");
        self.rebuild(module_id);
        true
    }

    /// Overrides one dimension of a board's size.
    ///
    /// The override is materialized from the current module size the first
    /// time, so later module edits no longer affect the other dimensions.
    pub fn set_board_individual_size(
        &mut self,
        board_id: BoardId,
        dimension: Dimension,
        value: f64,
    ) -> bool {
        if !is_positive(value) {
            warn!(board_id, value, "ignoring invalid board size");
            return false;
        }
        let Some(module) = self.module_with_board_mut(board_id) else {
            return false;
        };
        let module_id = module.id;
        let size = module.size;
        if let Some(board) = module.board_mut(board_id) {
            board.set_individual_dimension(size, dimension, value);
        }
        self.rebuild(module_id);
        true
    }

    /// Drops a board's size override so it follows the module size again.
    pub fn clear_board_individual_size(&mut self, board_id: BoardId) -> bool {
        let Some(module) = self.module_with_board_mut(board_id) else {
            return false;
        };
        let module_id = module.id;
        let changed = module
            .board_mut(board_id)
            .is_some_and(|b| b.individual_size.take().is_some());
        if changed {
            self.rebuild(module_id);
        }
        changed
    }

    /// Sets a single board's thickness in millimeters.
    pub fn set_board_thickness(&mut self, board_id: BoardId, thickness: f64) -> bool {
        if !is_positive(thickness) {
            return false;
        }
        let Some(module) = self.module_with_board_mut(board_id) else {
            return false;
        };
        let module_id = module.id;
        if let Some(board) = module.board_mut(board_id) {
            board.thickness = thickness;
        }
        self.rebuild(module_id);
        true
    }

    // ========================================================================
    // Supports and shelves
    // ========================================================================

    /// Adds a full-height support at (x, z) relative to the module origin.
    pub fn add_support(&mut self, module_id: ModuleId, x: f64, z: f64) -> Option<&Support> {
        let index = self.modules.iter().position(|m| m.id == module_id)?;
        let id = self.next_support_id;
        self.next_support_id += 1;

        self.modules[index].supports.push(Support {
            id,
            box_id: module_id,
            position: SupportPosition { x, z },
            thickness: self.defaults.board_thickness,
            width: self.defaults.support_width,
            enabled: true,
        });
        debug!(module_id, support_id = id, "added support");
        self.rebuild(module_id);
        self.modules[index].supports.last()
    }

    /// Adds a shelf at `height` above the module origin.
    pub fn add_shelf(&mut self, module_id: ModuleId, height: f64) -> Option<&Shelf> {
        let index = self.modules.iter().position(|m| m.id == module_id)?;
        let id = self.next_shelf_id;
        self.next_shelf_id += 1;

        self.modules[index].shelves.push(Shelf {
            id,
            box_id: module_id,
            height,
            thickness: self.defaults.board_thickness,
            width: None,
            depth: None,
            enabled: true,
        });
        debug!(module_id, shelf_id = id, "added shelf");
        self.rebuild(module_id);
        self.modules[index].shelves.last()
    }

    /// Removes a support, keeping a snapshot in the history.
    pub fn remove_support(&mut self, id: SupportId) -> bool {
        let Some(module) = self.modules.iter_mut().find(|m| m.support(id).is_some()) else {
            debug!(support_id = id, "remove_support: no such support");
            return false;
        };
        let module_id = module.id;
        let mut removed = None;
        module.supports.retain(|s| {
            if s.id == id {
                removed = Some(s.clone());
                false
            } else {
                true
            }
        });
        if let Some(support) = removed {
            self.history.push(DeletedComponentRecord::now(
                module_id,
                DeletedComponent::Support(support),
            ));
        }
        self.rebuild(module_id);
        true
    }

    /// Removes a shelf, keeping a snapshot in the history.
    pub fn remove_shelf(&mut self, id: ShelfId) -> bool {
        let Some(module) = self.modules.iter_mut().find(|m| m.shelf(id).is_some()) else {
            debug!(shelf_id = id, "remove_shelf: no such shelf");
            return false;
        };
        let module_id = module.id;
        let mut removed = None;
        module.shelves.retain(|s| {
            if s.id == id {
                removed = Some(s.clone());
                false
            } else {
                true
            }
        });
        if let Some(shelf) = removed {
            self.history.push(DeletedComponentRecord::now(
                module_id,
                DeletedComponent::Shelf(shelf),
            ));
        }
        self.rebuild(module_id);
        true
    }

    /// Moves a support. `None` leaves that axis unchanged; `Some(0.0)` sets it to zero.
    pub fn update_support_position(
        &mut self,
        id: SupportId,
        x: Option<f64>,
        z: Option<f64>,
    ) -> bool {
        self.edit_support(id, |support| {
            if let Some(x) = x {
                support.position.x = x;
            }
            if let Some(z) = z {
                support.position.z = z;
            }
        })
    }

    /// Changes a support's width (cm).
    pub fn update_support_width(&mut self, id: SupportId, width: f64) -> bool {
        if !is_positive(width) {
            return false;
        }
        self.edit_support(id, |support| support.width = width)
    }

    /// Changes a shelf's height offset. Any finite value is accepted.
    pub fn update_shelf_height(&mut self, id: ShelfId, height: f64) -> bool {
        if !height.is_finite() {
            return false;
        }
        self.edit_shelf(id, |shelf| shelf.height = height)
    }

    /// Overrides a shelf's width or depth.
    pub fn update_shelf_size(
        &mut self,
        id: ShelfId,
        dimension: ShelfDimension,
        value: f64,
    ) -> bool {
        if !is_positive(value) {
            return false;
        }
        self.edit_shelf(id, |shelf| match dimension {
            ShelfDimension::Width => shelf.width = Some(value),
            ShelfDimension::Depth => shelf.depth = Some(value),
        })
    }

    fn edit_support(&mut self, id: SupportId, edit: impl FnOnce(&mut Support)) -> bool {
        let found = self.modules.iter_mut().find_map(|m| {
            let module_id = m.id;
            m.supports
                .iter_mut()
                .find(|s| s.id == id)
                .map(|s| (module_id, s))
        });
        let Some((module_id, support)) = found else {
            debug!(support_id = id, "no such support");
            return false;
        };
        edit(support);
        self.rebuild(module_id);
        true
    }

    fn edit_shelf(&mut self, id: ShelfId, edit: impl FnOnce(&mut Shelf)) -> bool {
        let found = self.modules.iter_mut().find_map(|m| {
            let module_id = m.id;
            m.shelves
                .iter_mut()
                .find(|s| s.id == id)
                .map(|s| (module_id, s))
        });
        let Some((module_id, shelf)) = found else {
            debug!(shelf_id = id, "no such shelf");
            return false;
        };
        edit(shelf);
        self.rebuild(module_id);
        true
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Pops a history record and reinstates its snapshot.
    ///
    /// The record is removed whatever the outcome, so it can never apply twice.
    /// Returns `None` when the index is out of range.
    pub fn restore_deleted_component(&mut self, index: usize) -> Option<RestoreOutcome> {
        if index >= self.history.len() {
            return None;
        }
        let record = self.history.remove(index);
        let module_id = record.box_id;
        let component_id = record.component.id();

        let Some(module) = self.modules.iter_mut().find(|m| m.id == module_id) else {
            debug!(module_id, "restore: owning module is gone");
            return Some(RestoreOutcome::OwnerMissing);
        };

        let outcome = match record.component {
            DeletedComponent::Board(snapshot) => {
                let live = module
                    .boards
                    .get(snapshot.board_type)
                    .is_some_and(|b| b.enabled && b.id == snapshot.id);
                if live {
                    RestoreOutcome::AlreadyLive
                } else {
                    module.boards.insert(Board {
                        enabled: true,
                        ..snapshot
                    });
                    RestoreOutcome::Restored
                }
            }
            DeletedComponent::Support(snapshot) => {
                if module.support(snapshot.id).is_some() {
                    RestoreOutcome::AlreadyLive
                } else {
                    module.supports.push(snapshot);
                    RestoreOutcome::Restored
                }
            }
            DeletedComponent::Shelf(snapshot) => {
                if module.shelf(snapshot.id).is_some() {
                    RestoreOutcome::AlreadyLive
                } else {
                    module.shelves.push(snapshot);
                    RestoreOutcome::Restored
                }
            }
        };

        debug!(module_id, component_id, ?outcome, "restore deleted component");
        if outcome == RestoreOutcome::Restored {
            self.rebuild(module_id);
        }
        Some(outcome)
    }

    // ========================================================================
    // Free boards
    // ========================================================================

    /// Adds a free board with default dimensions.
    pub fn add_free_board(&mut self, orientation: Orientation, position: Vec3) -> &FreeBoard {
        let id = self.next_free_board_id;
        self.next_free_board_id += 1;

        let mut board = FreeBoard::new(id, orientation, position);
        board.dimensions.thickness = self.defaults.board_thickness;
        board.material.clone_from(&self.defaults.material);
        self.free_boards.push(board);
        self.rebuild_free_board(id);

        let index = self.free_boards.len() - 1;
        &self.free_boards[index]
    }

    /// Changes one dimension of a free board.
    pub fn update_free_board_dimension(
        &mut self,
        id: FreeBoardId,
        dimension: FreeBoardDimension,
        value: f64,
    ) -> bool {
        if !is_positive(value) {
            return false;
        }
        self.edit_free_board(id, |board| match dimension {
            FreeBoardDimension::Length => board.dimensions.length = value,
            FreeBoardDimension::Width => board.dimensions.width = value,
            FreeBoardDimension::Thickness => board.dimensions.thickness = value,
        })
    }

    /// Moves a free board.
    pub fn update_free_board_position(&mut self, id: FreeBoardId, patch: PositionPatch) -> bool {
        self.edit_free_board(id, |board| board.position = patch.apply(board.position))
    }

    /// Changes a free board's orientation.
    pub fn set_free_board_orientation(
        &mut self,
        id: FreeBoardId,
        orientation: Orientation,
    ) -> bool {
        self.edit_free_board(id, |board| board.reorient(orientation))
    }

    /// Sets a free board's rotation about one axis (degrees).
    pub fn rotate_free_board(&mut self, id: FreeBoardId, axis: Axis, degrees: f64) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        self.edit_free_board(id, |board| board.rotate(axis, degrees))
    }

    /// Sets a free board's material. Unknown material names are rejected.
    pub fn set_free_board_material(&mut self, id: FreeBoardId, material: &str) -> bool {
        let Some(known) = Material::parse(material) else {
            return false;
        };
        self.edit_free_board(id, |board| board.material = known.as_str().to_string())
    }

    /// Removes a free board. No history is kept.
    pub fn remove_free_board(&mut self, id: FreeBoardId) -> bool {
        let Some(index) = self.free_boards.iter().position(|b| b.id == id) else {
            return false;
        };
        self.free_boards.remove(index);
        self.free_geometry.remove(&id);
        self.changes.push(RegistryChange::FreeBoardRemoved(id));
        true
    }

    fn edit_free_board(&mut self, id: FreeBoardId, edit: impl FnOnce(&mut FreeBoard)) -> bool {
        let Some(board) = self.free_boards.iter_mut().find(|b| b.id == id) else {
            debug!(free_board_id = id, "no such free board");
            return false;
        };
        edit(board);
        self.rebuild_free_board(id);
        true
    }

    // ========================================================================
    // Bulk state
    // ========================================================================

    /// Replaces the whole design with a snapshot.
    ///
    /// History is cleared and each id counter moves past the largest loaded
    /// id, so ids are never reused within the session.
    pub fn load_snapshot(&mut self, snapshot: DesignSnapshot) {
        self.clear();

        let DesignSnapshot {
            mut modules,
            mut free_boards,
        } = snapshot;
        drop_duplicate_ids(&mut modules, &mut free_boards);

        for module in &mut modules {
            for board in module.boards.iter_mut() {
                board.box_id = module.id;
            }
            for support in &mut module.supports {
                support.box_id = module.id;
            }
            for shelf in &mut module.shelves {
                shelf.box_id = module.id;
            }

            self.next_module_id = self.next_module_id.max(module.id + 1);
            self.next_board_id = self.next_board_id.max(module.max_board_id() + 1);
            if let Some(max) = module.supports.iter().map(|s| s.id).max() {
                self.next_support_id = self.next_support_id.max(max + 1);
            }
            if let Some(max) = module.shelves.iter().map(|s| s.id).max() {
                self.next_shelf_id = self.next_shelf_id.max(max + 1);
            }
        }
        if let Some(max) = free_boards.iter().map(|b| b.id).max() {
            self.next_free_board_id = self.next_free_board_id.max(max + 1);
        }

        let module_ids: Vec<_> = modules.iter().map(|m| m.id).collect();
        let board_ids: Vec<_> = free_boards.iter().map(|b| b.id).collect();
        self.modules = modules;
        self.free_boards = free_boards;

        for id in module_ids {
            self.rebuild(id);
        }
        for id in board_ids {
            self.rebuild_free_board(id);
        }
        debug!(
            modules = self.modules.len(),
            free_boards = self.free_boards.len(),
            "loaded design snapshot"
        );
    }

    /// Removes every module and free board and clears the history.
    ///
    /// Id counters keep running.
    pub fn clear(&mut self) {
        for module in std::mem::take(&mut self.modules) {
            self.changes.push(RegistryChange::ModuleRemoved(module.id));
        }
        for board in std::mem::take(&mut self.free_boards) {
            self.changes.push(RegistryChange::FreeBoardRemoved(board.id));
        }
        self.geometry.clear();
        self.free_geometry.clear();
        self.history.clear();
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn module_with_board_mut(&mut self, board_id: BoardId) -> Option<&mut BoxModule> {
        let module = self
            .modules
            .iter_mut()
            .find(|m| m.board(board_id).is_some());
        if module.is_none() {
            debug!(board_id, "no such board");
        }
        module
    }

    fn rebuild(&mut self, module_id: ModuleId) {
        if let Some(module) = self.modules.iter().find(|m| m.id == module_id) {
            self.geometry
                .insert(module_id, build_module_geometry(module));
            self.changes.push(RegistryChange::ModuleRebuilt(module_id));
        }
    }

    fn rebuild_free_board(&mut self, id: FreeBoardId) {
        let Some(board) = self.free_boards.iter().find(|b| b.id == id) else {
            return;
        };
        match build_free_board_geometry(board) {
            Some(geometry) => {
                self.free_geometry.insert(id, geometry);
            }
            None => {
                self.free_geometry.remove(&id);
            }
        }
        self.changes.push(RegistryChange::FreeBoardRebuilt(id));
    }
}
