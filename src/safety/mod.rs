//! Structural safety heuristics for a design.
//!
//! The evaluator is a pure function over the current modules and free boards;
//! the formatter renders its report for the terminal or as JSON.

pub mod evaluator;
pub mod formatter;

pub use evaluator::{
    evaluate, evaluate_snapshot, Issue, IssueKind, SafetyReport, SafetyStats, Severity, Verdict,
};
pub use formatter::{OutputFormat, SafetyFormatter};
