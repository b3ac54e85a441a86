//! Application context wiring the registry, the interaction controller and a viewport.
//!
//! [`Workbench`] is the single owner of design state. Every mutation goes
//! through it so the viewport never drifts from the registry: after each edit
//! the registry's change notifications are drained into the scene sync and any
//! selection that pointed at a removed component is dropped.

use std::time::Instant;

use tracing::debug;

use crate::config::Config;
use crate::interaction::{DragFinished, ScreenPoint, Selection, SelectionController};
use crate::models::{Bounds, ModuleId, Vec3};
use crate::persistence::{to_persistable, DesignDocument, ParsedDesign};
use crate::safety::{evaluate, SafetyReport};
use crate::services::{ComponentRegistry, Template};
use crate::viewport::{SceneSync, ViewportAdapter};

type DragListener = Box<dyn FnMut(&DragFinished)>;

/// Design session bound to one viewport.
pub struct Workbench<V: ViewportAdapter> {
    registry: ComponentRegistry,
    controller: SelectionController,
    viewport: V,
    scene: SceneSync,
    drag_listeners: Vec<DragListener>,
}

impl<V: ViewportAdapter> Workbench<V> {
    /// Creates an empty session using the configured defaults.
    pub fn new(config: &Config, viewport: V) -> Self {
        Self {
            registry: ComponentRegistry::new(config.defaults.clone()),
            controller: SelectionController::new(&config.interaction),
            viewport,
            scene: SceneSync::new(),
            drag_listeners: Vec::new(),
        }
    }

    /// Read access to the design state.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The viewport being driven.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Render handle bookkeeping.
    pub fn scene(&self) -> &SceneSync {
        &self.scene
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.controller.selection()
    }

    /// Interaction state.
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Applies a registry mutation and brings the viewport up to date.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut ComponentRegistry) -> R) -> R {
        let result = f(&mut self.registry);
        self.sync();
        result
    }

    fn sync(&mut self) {
        let changes = self.registry.take_changes();
        if changes.is_empty() {
            return;
        }
        self.controller.prune(&self.registry);
        self.scene
            .apply(&changes, &self.registry, &mut self.viewport);
    }

    /// Expands a layout template into new modules.
    pub fn apply_template(&mut self, template: Template) -> Vec<ModuleId> {
        self.edit(|registry| template.expand(registry))
    }

    /// Registers a callback fired whenever a drag ends.
    pub fn on_drag_end(&mut self, listener: impl FnMut(&DragFinished) + 'static) {
        self.drag_listeners.push(Box::new(listener));
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// Pointer pressed at screen coordinates. Returns true if a drag started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let hit = self.viewport.hit_test(x, y);
        self.controller
            .pointer_down(hit, ScreenPoint::new(x, y), &self.registry)
    }

    /// Pointer moved. Returns the dragged module's new position, if dragging.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Vec3> {
        let position = self
            .controller
            .pointer_move(ScreenPoint::new(x, y), &mut self.registry);
        self.sync();
        position
    }

    /// Pointer released. Drag-end listeners are notified.
    pub fn pointer_up(&mut self) -> Option<DragFinished> {
        let finished = self.controller.pointer_up(&self.registry)?;
        for listener in &mut self.drag_listeners {
            listener(&finished);
        }
        Some(finished)
    }

    /// Single click; resolved later by [`poll`](Self::poll).
    pub fn click(&mut self, x: f64, y: f64, now: Instant) {
        let hit = self.viewport.hit_test(x, y);
        self.controller.click(hit, now);
    }

    /// Double click, applied immediately.
    pub fn double_click(&mut self, x: f64, y: f64) -> Selection {
        let hit = self.viewport.hit_test(x, y);
        self.controller.double_click(hit)
    }

    /// Applies a pending single click once its window has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Selection> {
        self.controller.poll(now)
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.controller.deselect();
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Runs the structural safety heuristics on the current design.
    pub fn check_safety(&self) -> SafetyReport {
        evaluate(self.registry.modules(), self.registry.free_boards())
    }

    /// Captures the current design as a document.
    pub fn document(&self, title: &str) -> DesignDocument {
        to_persistable(&self.registry.snapshot(), title)
    }

    /// Replaces the whole design with a loaded one.
    pub fn load_design(&mut self, parsed: ParsedDesign) {
        debug!(title = ?parsed.title(), "loading design into workbench");
        self.controller.deselect();
        self.edit(|registry| registry.load_snapshot(parsed.into_snapshot()));
    }

    /// Bounds enclosing the given modules as drawn, or every module when empty.
    pub fn frame_bounds(&self, modules: &[ModuleId]) -> Option<Bounds> {
        if modules.is_empty() {
            let all: Vec<_> = self.registry.modules().iter().map(|m| m.id).collect();
            return self.scene.union_bounds(&all, &self.viewport);
        }
        self.scene.union_bounds(modules, &self.viewport)
    }
}
