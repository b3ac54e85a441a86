//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, default module dimensions, and the
//! thresholds used by the structural safety checks.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Shelf Designer";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "shelf-designer";

/// Directory name used under the platform config/data directories.
pub const APP_DIR_NAME: &str = "ShelfDesigner";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SHELF_DESIGNER_CONFIG_DIR";

/// Platform string written into design document metadata.
pub const PLATFORM_NAME: &str = "Shelf Designer v1.0";

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "shelf-designer-api";

/// Current design document schema version.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Title used when a design is saved without one.
pub const DEFAULT_DESIGN_TITLE: &str = "収納棚設計";

/// Default module width in centimeters.
pub const DEFAULT_MODULE_WIDTH: f64 = 80.0;

/// Default module height in centimeters.
pub const DEFAULT_MODULE_HEIGHT: f64 = 180.0;

/// Default module depth in centimeters.
pub const DEFAULT_MODULE_DEPTH: f64 = 35.0;

/// Default board thickness in millimeters.
pub const DEFAULT_BOARD_THICKNESS_MM: f64 = 18.0;

/// Default support (vertical divider) width in centimeters.
pub const DEFAULT_SUPPORT_WIDTH: f64 = 10.0;

/// Default material name.
pub const DEFAULT_MATERIAL: &str = "pine";

/// Shelves are inset by this much (cm) from the module width/depth unless overridden.
pub const SHELF_INSET: f64 = 2.0;

/// Default free board length in centimeters.
pub const DEFAULT_FREE_BOARD_LENGTH: f64 = 60.0;

/// Default free board width in centimeters.
pub const DEFAULT_FREE_BOARD_WIDTH: f64 = 30.0;

/// Pointer drag sensitivity in centimeters per screen pixel.
pub const DEFAULT_DRAG_SENSITIVITY: f64 = 0.1;

/// Window (ms) within which a second click turns a single click into a double click.
pub const DEFAULT_DOUBLE_CLICK_WINDOW_MS: u64 = 200;

/// Default HTTP port of the design store server.
pub const DEFAULT_SERVER_PORT: u16 = 3001;

/// Default bind address of the design store server.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Modules wider than this (cm) need the standard thickness for load capacity.
pub const LOAD_WIDTH_THRESHOLD: f64 = 100.0;

/// Minimum standard thickness (mm) for wide modules.
pub const LOAD_MIN_THICKNESS_MM: f64 = 18.0;

/// Height to footprint ratio above which a module may tip over.
pub const STABILITY_WARNING_RATIO: f64 = 4.0;

/// Height to footprint ratio above which a module is considered dangerous.
pub const STABILITY_DANGER_RATIO: f64 = 6.0;

/// Boards thinner than this (mm) are flagged.
pub const MIN_BOARD_THICKNESS_MM: f64 = 12.0;

/// Spans longer than this (cm) should get an extra support.
pub const MAX_UNSUPPORTED_SPAN: f64 = 120.0;
