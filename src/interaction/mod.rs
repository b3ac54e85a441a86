//! Pointer interaction: selection, click disambiguation and module dragging.

pub mod click;
pub mod drag;
pub mod selection;

pub use click::{ClickDebouncer, DueClick};
pub use drag::{module_drag_position, DragFinished, DragState, ScreenPoint};
pub use selection::{BoardRef, Selection, SelectionController};
