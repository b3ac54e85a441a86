//! Export of designs to shop-floor formats.
//!
//! Currently a bill of materials in CSV form; the design document itself is
//! handled by [`crate::persistence`].

pub mod bom;

pub use bom::{collect_lines, generate_bom_csv, material_usage, BomLine, BOM_HEADER};
