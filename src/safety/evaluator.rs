//! Heuristic structural safety evaluation.
//!
//! This is an estimator, not an engineering calculation. Every enabled board,
//! support, shelf and free board is treated as a flat panel with a length,
//! width and thickness; weight and cost are summed over panels and four simple
//! checks produce warnings:
//!
//! - load capacity: wide modules built from thin boards
//! - stability: tall modules on a narrow footprint (warning above 4:1, an
//!   additional danger issue above 6:1)
//! - thickness: any panel thinner than 12mm
//! - span: modules wider than 120cm or individual panels longer than 120cm
//!
//! # Example
//!
//! ```rust
//! use shelf_designer::safety::{evaluate, Verdict};
//!
//! let report = evaluate(&[], &[]);
//! assert_eq!(report.overall, Verdict::Safe);
//! assert_eq!(report.stats.total_weight, 0.0);
//! ```
//!
//! # Error Handling
//!
//! Malformed entries (non-finite or non-positive dimensions) are skipped with a
//! warning and never abort the evaluation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{
    LOAD_MIN_THICKNESS_MM, LOAD_WIDTH_THRESHOLD, MAX_UNSUPPORTED_SPAN, MIN_BOARD_THICKNESS_MM,
    STABILITY_DANGER_RATIO, STABILITY_WARNING_RATIO,
};
use crate::models::{BoxModule, DesignSnapshot, FreeBoard, Material, ModuleId};

/// Severity of a single issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth fixing
    Warning,
    /// Likely unsafe
    Danger,
}

/// Overall verdict of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No issues
    Safe,
    /// Only warnings
    Warning,
    /// At least one danger issue
    Danger,
}

impl Verdict {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Which check produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Load capacity
    Load,
    /// Tip-over risk
    Stability,
    /// Material thickness
    Thickness,
    /// Unsupported span
    Span,
}

impl IssueKind {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Stability => "stability",
            Self::Thickness => "thickness",
            Self::Span => "span",
        }
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Check that produced it
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// How serious it is
    pub severity: Severity,
    /// Short headline
    pub message: String,
    /// Details naming the offending component
    pub description: String,
    /// Module concerned, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<ModuleId>,
}

/// Aggregate numbers over the whole design.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyStats {
    /// Total weight in kg, one decimal
    pub total_weight: f64,
    /// Largest single linear dimension in cm
    pub max_span: f64,
    /// Estimated material cost, whole currency units
    pub estimated_cost: f64,
}

/// Result of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReport {
    /// Worst severity found
    pub overall: Verdict,
    /// Findings in check order
    pub issues: Vec<Issue>,
    /// De-duplicated advice
    pub recommendations: Vec<String>,
    /// Weight, span and cost
    pub stats: SafetyStats,
}

impl SafetyReport {
    /// Number of issues with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// True if any issue came from the given check.
    #[must_use]
    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }
}

/// A flat panel as seen by the estimator.
#[derive(Debug, Clone)]
struct Panel {
    label: String,
    module_id: Option<ModuleId>,
    length: f64,
    width: f64,
    thickness: f64,
    material: Material,
    /// Supports, shelves, resized boards and free boards
    individual: bool,
}

impl Panel {
    fn is_valid(&self) -> bool {
        [self.length, self.width, self.thickness]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    fn area_m2(&self) -> f64 {
        (self.length / 100.0) * (self.width / 100.0)
    }

    fn volume_m3(&self) -> f64 {
        self.area_m2() * (self.thickness / 1000.0)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn module_panels(module: &BoxModule) -> Vec<Panel> {
    let material = Material::from_name(&module.material);
    let size = module.size;
    let mut panels = Vec::new();

    for board in module.boards.enabled() {
        let (length, width) = board.board_type.panel_extent(board.effective_size(size));
        panels.push(Panel {
            label: format!("module {} {} board", module.id, board.board_type),
            module_id: Some(module.id),
            length,
            width,
            thickness: board.thickness,
            material,
            individual: board.individual_size.is_some(),
        });
    }

    for support in module.supports.iter().filter(|s| s.enabled) {
        panels.push(Panel {
            label: format!("module {} support {}", module.id, support.id),
            module_id: Some(module.id),
            length: size.height,
            width: support.width,
            thickness: support.thickness,
            material,
            individual: true,
        });
    }

    for shelf in module.shelves.iter().filter(|s| s.enabled) {
        let (length, width) = shelf.effective_extent(size.width, size.depth);
        panels.push(Panel {
            label: format!("module {} shelf {}", module.id, shelf.id),
            module_id: Some(module.id),
            length,
            width,
            thickness: shelf.thickness,
            material,
            individual: true,
        });
    }

    panels
}

fn free_board_panel(board: &FreeBoard) -> Panel {
    Panel {
        label: format!("free board {}", board.id),
        module_id: None,
        length: board.dimensions.length,
        width: board.dimensions.width,
        thickness: board.dimensions.thickness,
        material: Material::from_name(&board.material),
        individual: true,
    }
}

struct ReportBuilder {
    issues: Vec<Issue>,
    recommendations: Vec<String>,
}

impl ReportBuilder {
    fn issue(
        &mut self,
        kind: IssueKind,
        severity: Severity,
        module_id: Option<ModuleId>,
        message: &str,
        description: String,
    ) {
        self.issues.push(Issue {
            kind,
            severity,
            message: message.to_string(),
            description,
            module_id,
        });
    }

    fn recommend(&mut self, text: &str) {
        if !self.recommendations.iter().any(|r| r == text) {
            self.recommendations.push(text.to_string());
        }
    }
}

/// Evaluates modules and free boards. Pure: the inputs are never modified.
#[must_use]
pub fn evaluate(modules: &[BoxModule], free_boards: &[FreeBoard]) -> SafetyReport {
    let mut builder = ReportBuilder {
        issues: Vec::new(),
        recommendations: Vec::new(),
    };
    let mut panels = Vec::new();
    let mut max_span: f64 = 0.0;

    for module in modules {
        if !module.size.is_valid() {
            warn!(module_id = module.id, size = ?module.size, "skipping module with invalid size");
            continue;
        }
        let size = module.size;
        max_span = max_span.max(size.width).max(size.height);

        // Load capacity
        if let Some(thickness) = module.standard_thickness() {
            if size.width > LOAD_WIDTH_THRESHOLD && thickness < LOAD_MIN_THICKNESS_MM {
                builder.issue(
                    IssueKind::Load,
                    Severity::Warning,
                    Some(module.id),
                    "Load capacity may be insufficient",
                    format!(
                        "Module {} is {}cm wide but built from {}mm boards",
                        module.id, size.width, thickness
                    ),
                );
                builder.recommend("Use boards at least 18mm thick for modules wider than 100cm");
            }
        }

        // Stability
        let footprint = size.width.min(size.depth);
        let ratio = size.height / footprint;
        if ratio > STABILITY_WARNING_RATIO {
            builder.issue(
                IssueKind::Stability,
                Severity::Warning,
                Some(module.id),
                "Tip-over risk",
                format!(
                    "Module {} has a height to footprint ratio of {:.1}",
                    module.id, ratio
                ),
            );
            builder.recommend("Anchor the unit to a wall or widen its footprint");
        }
        if ratio > STABILITY_DANGER_RATIO {
            builder.issue(
                IssueKind::Stability,
                Severity::Danger,
                Some(module.id),
                "Unit is very likely to tip over",
                format!(
                    "Module {} exceeds a height to footprint ratio of {}",
                    module.id, STABILITY_DANGER_RATIO
                ),
            );
            builder.recommend("Reduce the height or increase the depth before building");
        }

        // Span
        if size.width > MAX_UNSUPPORTED_SPAN {
            builder.issue(
                IssueKind::Span,
                Severity::Warning,
                Some(module.id),
                "Span too long",
                format!(
                    "Module {} spans {}cm without intermediate support",
                    module.id, size.width
                ),
            );
            builder.recommend("Add a support to break up spans longer than 120cm");
        }

        panels.extend(module_panels(module));
    }

    panels.extend(free_boards.iter().filter(|b| b.enabled).map(free_board_panel));

    let mut total_weight = 0.0;
    let mut total_cost = 0.0;

    for panel in &panels {
        if !panel.is_valid() {
            warn!(panel = %panel.label, "skipping panel with invalid dimensions");
            continue;
        }
        let properties = panel.material.properties();
        total_weight += panel.volume_m3() * properties.density;
        total_cost += panel.area_m2() * properties.cost_per_m2;
        max_span = max_span.max(panel.length).max(panel.width);

        if panel.thickness < MIN_BOARD_THICKNESS_MM {
            builder.issue(
                IssueKind::Thickness,
                Severity::Warning,
                panel.module_id,
                "Board too thin",
                format!("The {} is only {}mm thick", panel.label, panel.thickness),
            );
            builder.recommend("Use boards at least 12mm thick");
        }

        if panel.individual && panel.length > MAX_UNSUPPORTED_SPAN {
            builder.issue(
                IssueKind::Span,
                Severity::Warning,
                panel.module_id,
                "Span too long",
                format!("The {} is {}cm long", panel.label, panel.length),
            );
            builder.recommend("Add a support to break up spans longer than 120cm");
        }
    }

    let overall = if builder.issues.iter().any(|i| i.severity == Severity::Danger) {
        Verdict::Danger
    } else if builder.issues.is_empty() {
        Verdict::Safe
    } else {
        Verdict::Warning
    };

    SafetyReport {
        overall,
        issues: builder.issues,
        recommendations: builder.recommendations,
        stats: SafetyStats {
            total_weight: round_to(total_weight, 1),
            max_span,
            estimated_cost: total_cost.round(),
        },
    }
}

/// Evaluates a design snapshot.
#[must_use]
pub fn evaluate_snapshot(snapshot: &DesignSnapshot) -> SafetyReport {
    evaluate(&snapshot.modules, &snapshot.free_boards)
}
