//! Service layer for business logic.
//!
//! This module contains services that encapsulate complex business logic
//! and coordinate between different parts of the application.

pub mod geometry;
pub mod registry;
pub mod templates;

// Re-export commonly used types and functions
pub use geometry::{
    build_free_board_geometry, build_module_geometry, ComponentGeometry, ComponentKind,
};
pub use registry::{ComponentRegistry, RegistryChange, RestoreOutcome};
pub use templates::Template;
