//! End-to-end design scenarios driven through the public API: editing,
//! deletion history, pointer interaction and persistence.

use std::time::{Duration, Instant};

use tempfile::TempDir;

use shelf_designer::app::Workbench;
use shelf_designer::config::Config;
use shelf_designer::interaction::{BoardRef, Selection};
use shelf_designer::models::{BoardType, DeletedKind, Dimension, SizePatch, Vec3};
use shelf_designer::persistence::{DesignStore, PersistenceAdapter};
use shelf_designer::safety::Verdict;
use shelf_designer::services::{ComponentRegistry, RestoreOutcome, Template};
use shelf_designer::viewport::{HeadlessScene, ViewTransform};

// Screen (400, 400) is the world origin; 1px = 1cm, so (400, 310) lands on
// the back board of a default module at the origin.
fn workbench() -> Workbench<HeadlessScene> {
    let view = ViewTransform {
        scale: 1.0,
        origin_x: 400.0,
        origin_y: 400.0,
    };
    Workbench::new(&Config::default(), HeadlessScene::new(view))
}

// ============================================================================
// Registry Scenarios
// ============================================================================

#[test]
fn test_removed_shelf_restores_with_identical_values() {
    let mut registry = ComponentRegistry::default();
    let id = registry.add_module(Vec3::ZERO).id;
    registry.add_support(id, -20.0, 0.0);
    registry.add_support(id, 20.0, 0.0);
    let shelf_id = registry.add_shelf(id, 90.0).map(|s| s.id).unwrap();
    let before = registry.find_shelf(shelf_id).cloned().unwrap();

    assert!(registry.remove_shelf(shelf_id));
    let module = registry.module(id).unwrap();
    assert_eq!(module.shelves.len(), 0);
    assert_eq!(module.supports.len(), 2);

    let history = registry.deleted_components();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].component.kind(), DeletedKind::Shelf);
    assert_eq!(history[0].box_id, id);

    assert_eq!(
        registry.restore_deleted_component(0),
        Some(RestoreOutcome::Restored)
    );
    let restored = registry.find_shelf(shelf_id).unwrap();
    assert_eq!(restored, &before);
    assert!(registry.deleted_components().is_empty());
}

#[test]
fn test_disabled_board_survives_size_edit() {
    let mut registry = ComponentRegistry::default();
    let id = registry.add_module(Vec3::ZERO).id;
    registry.toggle_board(id, BoardType::Left, false);
    registry.set_module_size(id, SizePatch::only(Dimension::Width, 120.0));

    let module = registry.module(id).unwrap();
    let left = module.board_of_type(BoardType::Left).unwrap();
    assert!(!left.enabled);
    assert_eq!(module.boards.enabled().count(), 4);

    // Geometry only covers enabled boards.
    assert_eq!(registry.geometry(id).unwrap().len(), 4);
}

#[test]
fn test_removing_module_cascades() {
    let mut registry = ComponentRegistry::default();
    let ids = Template::LShape.expand(&mut registry);
    let support = registry.add_support(ids[0], 0.0, 0.0).map(|s| s.id).unwrap();

    assert!(registry.remove_module(ids[0]));
    assert!(registry.find_support(support).is_none());
    assert_eq!(registry.modules().len(), 4);
    assert!(!registry.remove_module(ids[0]));
}

// ============================================================================
// Interaction Scenarios
// ============================================================================

#[test]
fn test_drag_moves_up_and_right() {
    let mut bench = workbench();
    let id = bench.edit(|r| r.add_module(Vec3::ZERO).id);

    assert!(bench.pointer_down(400.0, 310.0));
    let position = bench.pointer_move(410.0, 300.0).unwrap();
    bench.pointer_up();

    let module = bench.registry().module(id).unwrap();
    assert!(module.position.x > 0.0);
    assert!(module.position.y > 0.0);
    assert_eq!(module.position.z, 0.0);
    assert_eq!(module.position, position);
}

#[test]
fn test_drag_never_goes_below_floor() {
    let mut bench = workbench();
    let id = bench.edit(|r| r.add_module(Vec3::ZERO).id);

    bench.pointer_down(400.0, 310.0);
    bench.pointer_move(400.0, 500.0);
    bench.pointer_up();

    assert_eq!(bench.registry().module(id).unwrap().position.y, 0.0);
}

#[test]
fn test_single_click_toggles_module_selection() {
    let mut bench = workbench();
    let id = bench.edit(|r| r.add_module(Vec3::ZERO).id);
    let t0 = Instant::now();

    bench.click(400.0, 310.0, t0);
    assert_eq!(bench.selection(), Selection::Idle, "click waits for the window");
    bench.poll(t0 + Duration::from_secs(1));
    assert_eq!(bench.selection(), Selection::ModuleSelected(id));

    let t1 = t0 + Duration::from_secs(2);
    bench.click(400.0, 310.0, t1);
    bench.poll(t1 + Duration::from_secs(1));
    assert_eq!(bench.selection(), Selection::Idle);
}

#[test]
fn test_double_click_edits_board_and_locks_drag() {
    let mut bench = workbench();
    let id = bench.edit(|r| r.add_module(Vec3::ZERO).id);
    let back = bench
        .registry()
        .module(id)
        .and_then(|m| m.board_of_type(BoardType::Back))
        .map(|b| b.id)
        .unwrap();

    let selection = bench.double_click(400.0, 310.0);
    assert_eq!(
        selection,
        Selection::BoardEditing(BoardRef::Module {
            module_id: id,
            board_type: BoardType::Back,
            board_id: back,
        })
    );

    // The board under edit is positioned numerically, never dragged.
    assert!(!bench.pointer_down(400.0, 310.0));
    assert_eq!(bench.registry().module(id).unwrap().position, Vec3::ZERO);

    bench.deselect();
    assert_eq!(bench.selection(), Selection::Idle);
    assert!(bench.pointer_down(400.0, 310.0));
}

// ============================================================================
// Persistence Scenarios
// ============================================================================

#[test]
fn test_design_survives_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = DesignStore::open(temp_dir.path()).unwrap();

    let mut bench = workbench();
    bench.apply_template(Template::LShape);
    bench.edit(|r| {
        r.add_shelf(1, 20.0);
    });
    let document = bench.document("Cubbies");

    let summary = store.save(None, &document).unwrap();
    assert_eq!(summary.title, "Cubbies");
    assert_eq!(store.list().unwrap().len(), 1);

    let parsed = store.load(&summary.id).unwrap();
    assert_eq!(parsed.title(), Some("Cubbies"));

    let mut other = workbench();
    other.load_design(parsed);
    assert_eq!(other.registry().snapshot(), bench.registry().snapshot());
    assert_eq!(other.check_safety().overall, Verdict::Safe);

    // Saving with the id updates in place.
    let updated = store.save(Some(summary.id.as_str()), &other.document("Renamed")).unwrap();
    assert_eq!(updated.id, summary.id);
    assert_eq!(store.list().unwrap()[0].title, "Renamed");

    store.delete(&summary.id).unwrap();
    assert!(store.list().unwrap().is_empty());
}
