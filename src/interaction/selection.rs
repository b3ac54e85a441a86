//! Selection state machine and pointer handling.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::click::ClickDebouncer;
use super::drag::{DragFinished, DragState, ScreenPoint};
use crate::config::InteractionConfig;
use crate::models::{BoardId, BoardType, FreeBoardId, ModuleId, PositionPatch, Vec3};
use crate::services::geometry::ComponentKind;
use crate::services::registry::ComponentRegistry;
use crate::viewport::HitResult;

/// Reference to an individually selected board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BoardRef {
    /// One of a module's five boards
    #[serde(rename_all = "camelCase")]
    Module {
        /// Owning module
        module_id: ModuleId,
        /// Slot of the board
        board_type: BoardType,
        /// Board id
        board_id: BoardId,
    },
    /// A free-standing board
    Free {
        /// Free board id
        id: FreeBoardId,
    },
}

/// What is currently selected. Exactly one state at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "target", rename_all = "camelCase")]
pub enum Selection {
    /// Nothing selected
    #[default]
    Idle,
    /// A whole module is selected
    ModuleSelected(ModuleId),
    /// A single board is being edited numerically
    BoardEditing(BoardRef),
}

impl Selection {
    /// Selected module, if the selection is at module level.
    #[must_use]
    pub const fn module_id(&self) -> Option<ModuleId> {
        match self {
            Self::ModuleSelected(id) => Some(*id),
            _ => None,
        }
    }
}

/// Turns hit-test results and pointer input into selection changes and
/// constrained module moves.
///
/// # State transitions
///
/// - single click on a module component: select that module, or deselect it
///   if it was already selected
/// - single click on empty space: deselect
/// - double click on a board: edit that board; pending single clicks are dropped
/// - [`deselect`](Self::deselect): back to idle from anywhere
///
/// Single clicks take effect only after the double-click window, via
/// [`poll`](Self::poll).
#[derive(Debug, Clone)]
pub struct SelectionController {
    selection: Selection,
    debouncer: ClickDebouncer,
    drag: Option<DragState>,
    sensitivity: f64,
    swallow_next_click: bool,
}

impl SelectionController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            selection: Selection::Idle,
            debouncer: ClickDebouncer::new(Duration::from_millis(config.double_click_window_ms)),
            drag: None,
            sensitivity: config.drag_sensitivity,
            swallow_next_click: false,
        }
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// True while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Drag in progress, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// True while a single click waits for the double-click window.
    #[must_use]
    pub fn has_pending_click(&self) -> bool {
        self.debouncer.is_pending()
    }

    // ========================================================================
    // Pointer drag
    // ========================================================================

    /// Starts a module drag if the pointer went down on a draggable component.
    ///
    /// Free boards and the board currently in numeric editing are never dragged.
    pub fn pointer_down(
        &mut self,
        hit: Option<HitResult>,
        pointer: ScreenPoint,
        registry: &ComponentRegistry,
    ) -> bool {
        let Some(hit) = hit else {
            return false;
        };
        if self.is_drag_locked(&hit) {
            return false;
        }
        let Some(module) = hit.box_id.and_then(|id| registry.module(id)) else {
            return false;
        };
        self.drag = Some(DragState {
            module_id: module.id,
            start_pointer: pointer,
            start_position: module.position,
            moved: false,
        });
        true
    }

    /// Moves the dragged module to follow the pointer.
    pub fn pointer_move(
        &mut self,
        pointer: ScreenPoint,
        registry: &mut ComponentRegistry,
    ) -> Option<Vec3> {
        let drag = self.drag.as_mut()?;
        let position = drag.position_at(pointer, self.sensitivity);
        if pointer != drag.start_pointer {
            drag.moved = true;
        }
        registry.set_module_position(
            drag.module_id,
            PositionPatch {
                x: Some(position.x),
                y: Some(position.y),
                z: None,
            },
        );
        Some(position)
    }

    /// Ends the drag. The click that follows a real drag is swallowed.
    pub fn pointer_up(&mut self, registry: &ComponentRegistry) -> Option<DragFinished> {
        let drag = self.drag.take()?;
        if drag.moved {
            self.swallow_next_click = true;
        }
        let position = registry
            .module(drag.module_id)
            .map_or(drag.start_position, |m| m.position);
        debug!(module_id = drag.module_id, moved = drag.moved, "drag finished");
        Some(DragFinished {
            module_id: drag.module_id,
            position,
            moved: drag.moved,
        })
    }

    // ========================================================================
    // Clicks
    // ========================================================================

    /// Registers a single click; it takes effect after the double-click window.
    pub fn click(&mut self, hit: Option<HitResult>, now: Instant) {
        if std::mem::take(&mut self.swallow_next_click) || self.drag.is_some() {
            return;
        }
        self.debouncer.click(hit, now);
    }

    /// Handles a double click immediately, dropping any pending single click.
    pub fn double_click(&mut self, hit: Option<HitResult>) -> Selection {
        self.debouncer.cancel();
        self.swallow_next_click = false;
        self.drag = None;

        self.selection = match hit {
            None => Selection::Idle,
            Some(hit) => match (hit.kind, hit.box_id) {
                (ComponentKind::Board(board_type), Some(module_id)) => {
                    Selection::BoardEditing(BoardRef::Module {
                        module_id,
                        board_type,
                        board_id: hit.logical_id,
                    })
                }
                (ComponentKind::FreeBoard, _) => {
                    Selection::BoardEditing(BoardRef::Free { id: hit.logical_id })
                }
                (_, Some(module_id)) => Selection::ModuleSelected(module_id),
                (_, None) => Selection::Idle,
            },
        };
        debug!(selection = ?self.selection, "double click");
        self.selection
    }

    /// Applies a single click whose window has elapsed.
    ///
    /// Returns the new selection when a click was applied.
    pub fn poll(&mut self, now: Instant) -> Option<Selection> {
        let due = self.debouncer.poll(now)?;
        self.selection = match due.hit {
            None => Selection::Idle,
            Some(hit) => match (hit.kind, hit.box_id) {
                (ComponentKind::FreeBoard, _) => {
                    let target = Selection::BoardEditing(BoardRef::Free { id: hit.logical_id });
                    if self.selection == target {
                        Selection::Idle
                    } else {
                        target
                    }
                }
                (_, Some(module_id)) => {
                    if self.selection == Selection::ModuleSelected(module_id) {
                        Selection::Idle
                    } else {
                        Selection::ModuleSelected(module_id)
                    }
                }
                (_, None) => Selection::Idle,
            },
        };
        debug!(selection = ?self.selection, "single click");
        Some(self.selection)
    }

    /// Clears selection, pending clicks and any drag.
    pub fn deselect(&mut self) {
        self.selection = Selection::Idle;
        self.debouncer.cancel();
        self.drag = None;
        self.swallow_next_click = false;
    }

    /// Drops selection or drag state that refers to components no longer in the registry.
    pub fn prune(&mut self, registry: &ComponentRegistry) {
        let stale = match self.selection {
            Selection::Idle => false,
            Selection::ModuleSelected(id) => registry.module(id).is_none(),
            Selection::BoardEditing(BoardRef::Module { board_id, .. }) => {
                registry.find_board(board_id).is_none()
            }
            Selection::BoardEditing(BoardRef::Free { id }) => registry.free_board(id).is_none(),
        };
        if stale {
            self.selection = Selection::Idle;
        }
        if self
            .drag
            .is_some_and(|d| registry.module(d.module_id).is_none())
        {
            self.drag = None;
        }
    }

    fn is_drag_locked(&self, hit: &HitResult) -> bool {
        if matches!(hit.kind, ComponentKind::FreeBoard) {
            return true;
        }
        matches!(
            self.selection,
            Selection::BoardEditing(BoardRef::Module { board_id, .. })
                if matches!(hit.kind, ComponentKind::Board(_)) && hit.logical_id == board_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_hit(module_id: ModuleId, board_id: BoardId) -> HitResult {
        HitResult {
            logical_id: board_id,
            kind: ComponentKind::Board(BoardType::Back),
            box_id: Some(module_id),
        }
    }

    fn controller() -> SelectionController {
        SelectionController::new(&InteractionConfig::default())
    }

    fn after_window(t0: Instant) -> Instant {
        t0 + Duration::from_millis(250)
    }

    #[test]
    fn test_single_click_selects_and_toggles() {
        let mut c = controller();
        let t0 = Instant::now();

        c.click(Some(board_hit(1, 5)), t0);
        assert_eq!(c.selection(), Selection::Idle);
        assert_eq!(c.poll(after_window(t0)), Some(Selection::ModuleSelected(1)));

        let t1 = after_window(t0);
        c.click(Some(board_hit(1, 3)), t1);
        assert_eq!(c.poll(after_window(t1)), Some(Selection::Idle));
    }

    #[test]
    fn test_click_on_empty_space_clears() {
        let mut c = controller();
        let t0 = Instant::now();
        c.click(Some(board_hit(2, 7)), t0);
        c.poll(after_window(t0));

        let t1 = after_window(t0);
        c.click(None, t1);
        assert_eq!(c.poll(after_window(t1)), Some(Selection::Idle));
    }

    #[test]
    fn test_double_click_cancels_single_and_edits_board() {
        let mut c = controller();
        let t0 = Instant::now();
        c.click(Some(board_hit(1, 5)), t0);
        c.click(Some(board_hit(1, 5)), t0 + Duration::from_millis(80));

        let selection = c.double_click(Some(board_hit(1, 5)));
        assert_eq!(
            selection,
            Selection::BoardEditing(BoardRef::Module {
                module_id: 1,
                board_type: BoardType::Back,
                board_id: 5,
            })
        );
        assert!(c.poll(after_window(t0)).is_none());
        assert_eq!(c.selection(), selection);
    }

    #[test]
    fn test_edited_board_cannot_be_dragged() {
        let mut registry = ComponentRegistry::default();
        let module_id = registry.add_module(Vec3::ZERO).id;
        let back_id = registry
            .module(module_id)
            .unwrap()
            .board_of_type(BoardType::Back)
            .unwrap()
            .id;

        let mut c = controller();
        c.double_click(Some(board_hit(module_id, back_id)));
        assert!(!c.pointer_down(
            Some(board_hit(module_id, back_id)),
            ScreenPoint::new(0.0, 0.0),
            &registry
        ));

        // Another board of the same module still drags the module
        assert!(c.pointer_down(
            Some(board_hit(module_id, back_id - 1)),
            ScreenPoint::new(0.0, 0.0),
            &registry
        ));
    }

    #[test]
    fn test_drag_moves_module_and_swallows_click() {
        let mut registry = ComponentRegistry::default();
        let module_id = registry.add_module(Vec3::ZERO).id;
        let mut c = controller();

        assert!(c.pointer_down(
            Some(board_hit(module_id, 1)),
            ScreenPoint::new(100.0, 100.0),
            &registry
        ));
        let position = c
            .pointer_move(ScreenPoint::new(110.0, 90.0), &mut registry)
            .unwrap();
        assert!((position.x - 1.0).abs() < 1e-9);
        assert!((position.y - 1.0).abs() < 1e-9);
        assert_eq!(position.z, 0.0);

        let finished = c.pointer_up(&registry).unwrap();
        assert!(finished.moved);
        assert_eq!(finished.position, registry.module(module_id).unwrap().position);

        let t0 = Instant::now();
        c.click(Some(board_hit(module_id, 1)), t0);
        assert!(c.poll(after_window(t0)).is_none());
        assert_eq!(c.selection(), Selection::Idle);
    }

    #[test]
    fn test_click_without_movement_still_selects() {
        let mut registry = ComponentRegistry::default();
        let module_id = registry.add_module(Vec3::ZERO).id;
        let mut c = controller();

        c.pointer_down(Some(board_hit(module_id, 1)), ScreenPoint::new(5.0, 5.0), &registry);
        assert!(!c.pointer_up(&registry).unwrap().moved);

        let t0 = Instant::now();
        c.click(Some(board_hit(module_id, 1)), t0);
        assert_eq!(c.poll(after_window(t0)), Some(Selection::ModuleSelected(module_id)));
    }

    #[test]
    fn test_free_board_click_selects_board() {
        let mut c = controller();
        let hit = HitResult {
            logical_id: 4,
            kind: ComponentKind::FreeBoard,
            box_id: None,
        };
        let t0 = Instant::now();
        c.click(Some(hit), t0);
        assert_eq!(
            c.poll(after_window(t0)),
            Some(Selection::BoardEditing(BoardRef::Free { id: 4 }))
        );
    }

    #[test]
    fn test_prune_clears_removed_module() {
        let mut registry = ComponentRegistry::default();
        let module_id = registry.add_module(Vec3::ZERO).id;
        let mut c = controller();
        let t0 = Instant::now();
        c.click(Some(board_hit(module_id, 1)), t0);
        c.poll(after_window(t0));

        registry.remove_module(module_id);
        c.prune(&registry);
        assert_eq!(c.selection(), Selection::Idle);
    }
}
