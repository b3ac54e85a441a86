//! CLI command handlers for Shelf Designer.
//!
//! Headless, scriptable access to design creation, safety checks and BOM
//! export for automation and CI.

pub mod bom;
pub mod check;
pub mod common;
pub mod config;
pub mod new;

// Re-export types used by main.rs and tests
pub use bom::BomArgs;
pub use check::CheckArgs;
pub use common::{CliError, CliErrorKind, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use new::NewArgs;
