//! Bill of materials as CSV.
//!
//! One row per enabled part, followed by a per-material volume summary:
//!
//! ```text
//! 部材,種別,長さ(cm),幅(cm),厚み(cm),材料,数量
//! 天板1,テンプレート板,80,35,1.8,"pine",1
//! ...
//!
//! 材料使用量合計
//! pine,,,,,0.059m³
//! ```

use std::fmt::Write as _;

use tracing::warn;

use crate::models::{BoxModule, DesignSnapshot, FreeBoard, Material};

/// CSV header row.
pub const BOM_HEADER: &str = "部材,種別,長さ(cm),幅(cm),厚み(cm),材料,数量";

const KIND_TEMPLATE: &str = "テンプレート板";
const KIND_SUPPORT: &str = "支柱";
const KIND_SHELF: &str = "棚板";
const KIND_FREE: &str = "個別板";

/// One row of the bill of materials.
#[derive(Debug, Clone, PartialEq)]
pub struct BomLine {
    /// Part name
    pub name: String,
    /// Part category
    pub kind: &'static str,
    /// Length in cm
    pub length: f64,
    /// Width in cm
    pub width: f64,
    /// Thickness in mm
    pub thickness_mm: f64,
    /// Material
    pub material: Material,
}

impl BomLine {
    fn volume_m3(&self) -> f64 {
        (self.length / 100.0) * (self.width / 100.0) * (self.thickness_mm / 1000.0)
    }

    fn is_valid(&self) -> bool {
        [self.length, self.width, self.thickness_mm]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

fn module_lines(module: &BoxModule, lines: &mut Vec<BomLine>) {
    let material = Material::from_name(&module.material);
    let size = module.size;

    for board in module.boards.enabled() {
        let (length, width) = board.board_type.panel_extent(board.effective_size(size));
        lines.push(BomLine {
            name: format!("{}{}", board.board_type.part_name(), module.id),
            kind: KIND_TEMPLATE,
            length,
            width,
            thickness_mm: board.thickness,
            material,
        });
    }
    for support in module.supports.iter().filter(|s| s.enabled) {
        lines.push(BomLine {
            name: format!("{KIND_SUPPORT}{}", support.id),
            kind: KIND_SUPPORT,
            length: size.height,
            width: support.width,
            thickness_mm: support.thickness,
            material,
        });
    }
    for shelf in module.shelves.iter().filter(|s| s.enabled) {
        let (length, width) = shelf.effective_extent(size.width, size.depth);
        lines.push(BomLine {
            name: format!("{KIND_SHELF}{}", shelf.id),
            kind: KIND_SHELF,
            length,
            width,
            thickness_mm: shelf.thickness,
            material,
        });
    }
}

fn free_board_line(board: &FreeBoard) -> BomLine {
    BomLine {
        name: format!("{KIND_FREE}{}", board.id),
        kind: KIND_FREE,
        length: board.dimensions.length,
        width: board.dimensions.width,
        thickness_mm: board.dimensions.thickness,
        material: Material::from_name(&board.material),
    }
}

/// Collects the parts of a design. Entries with unusable dimensions are dropped.
#[must_use]
pub fn collect_lines(snapshot: &DesignSnapshot) -> Vec<BomLine> {
    let mut lines = Vec::new();
    for module in &snapshot.modules {
        module_lines(module, &mut lines);
    }
    lines.extend(
        snapshot
            .free_boards
            .iter()
            .filter(|b| b.enabled)
            .map(free_board_line),
    );

    lines.retain(|line| {
        let valid = line.is_valid();
        if !valid {
            warn!(part = %line.name, "leaving part with invalid dimensions out of the BOM");
        }
        valid
    });
    lines
}

/// Total volume per material in m³, in first-seen order.
#[must_use]
pub fn material_usage(lines: &[BomLine]) -> Vec<(Material, f64)> {
    let mut usage: Vec<(Material, f64)> = Vec::new();
    for line in lines {
        match usage.iter_mut().find(|(m, _)| *m == line.material) {
            Some((_, volume)) => *volume += line.volume_m3(),
            None => usage.push((line.material, line.volume_m3())),
        }
    }
    usage
}

/// Renders the bill of materials for a design.
#[must_use]
pub fn generate_bom_csv(snapshot: &DesignSnapshot) -> String {
    let lines = collect_lines(snapshot);
    let mut output = String::new();

    output.push_str(BOM_HEADER);
    output.push('\n');
    for line in &lines {
        let _ = writeln!(
            output,
            "{},{},{},{},{},\"{}\",1",
            line.name,
            line.kind,
            line.length,
            line.width,
            line.thickness_mm / 10.0,
            line.material.as_str()
        );
    }

    output.push_str("\n材料使用量合計\n");
    for (material, volume) in material_usage(&lines) {
        let _ = writeln!(output, "{},,,,,{:.3}m³", material.as_str(), volume);
    }

    output
}
