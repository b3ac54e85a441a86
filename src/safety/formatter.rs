//! Output formatting for safety reports.
//!
//! Terminal output uses the same visual indicators as the rest of the CLI
//! (✓/⚠/✗); JSON output is the report itself, serialized for scripts.

use std::fmt::Write;

use super::evaluator::{SafetyReport, Severity, Verdict};

/// Output format for safety reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Terminal,
    /// Machine-readable JSON output
    Json,
}

/// Formatter for [`SafetyReport`]s.
#[derive(Debug, Clone, Default)]
pub struct SafetyFormatter {
    format: OutputFormat,
}

impl SafetyFormatter {
    /// Creates a formatter with terminal output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with the given output format.
    #[must_use]
    pub const fn with_format(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a report, optionally titled with the design name.
    pub fn format_report(&self, report: &SafetyReport, title: Option<&str>) -> String {
        match self.format {
            OutputFormat::Terminal => Self::format_terminal(report, title),
            OutputFormat::Json => Self::format_json(report),
        }
    }

    fn format_terminal(report: &SafetyReport, title: Option<&str>) -> String {
        let mut output = String::new();

        let header = title.map_or_else(
            || "Structural Safety Report".to_string(),
            |t| format!("Structural Safety Report: {t}"),
        );
        output.push_str(&header);
        output.push('\n');
        output.push_str(&"═".repeat(header.chars().count()));
        output.push_str("\n\n");

        // Stats
        let label_width: usize = 16;
        for (label, value) in [
            ("Total weight", format!("{:.1} kg", report.stats.total_weight)),
            ("Max span", format!("{} cm", report.stats.max_span)),
            ("Estimated cost", format!("{}", report.stats.estimated_cost)),
        ] {
            let dots = ".".repeat(label_width.saturating_sub(label.len()));
            writeln!(output, "  {label}{dots} {value}").expect("Writing to String should not fail");
        }
        output.push('\n');

        // Issues
        for issue in &report.issues {
            let symbol = match issue.severity {
                Severity::Warning => "⚠",
                Severity::Danger => "✗",
            };
            writeln!(
                output,
                "{} [{}] {}",
                symbol,
                issue.kind.as_str(),
                issue.message
            )
            .expect("Writing to String should not fail");
            writeln!(output, "    {}", issue.description)
                .expect("Writing to String should not fail");
        }

        if !report.recommendations.is_empty() {
            output.push_str("\nRecommendations:\n");
            for (index, recommendation) in report.recommendations.iter().enumerate() {
                writeln!(output, "  {}. {}", index + 1, recommendation)
                    .expect("Writing to String should not fail");
            }
        }

        output.push_str("\n───────────────────────────────────\n");
        let warnings = report.count(Severity::Warning);
        let dangers = report.count(Severity::Danger);
        match report.overall {
            Verdict::Safe => output.push_str("✓ No structural issues found\n"),
            Verdict::Warning => {
                writeln!(output, "⚠ {warnings} warning(s), review before building")
                    .expect("Writing to String should not fail");
            }
            Verdict::Danger => {
                writeln!(
                    output,
                    "✗ {dangers} danger(s) and {warnings} warning(s), do not build as designed"
                )
                .expect("Writing to String should not fail");
            }
        }

        output
    }

    fn format_json(report: &SafetyReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| {
            r#"{"overall":"error","message":"Failed to serialize safety report"}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::evaluate;

    #[test]
    fn test_terminal_output_for_empty_design() {
        let report = evaluate(&[], &[]);
        let output = SafetyFormatter::new().format_report(&report, Some("Hallway"));

        assert!(output.starts_with("Structural Safety Report: Hallway\n═"));
        assert!(output.contains("Total weight.... 0.0 kg"));
        assert!(output.contains("✓ No structural issues found"));
        assert!(!output.contains("Recommendations"));
    }

    #[test]
    fn test_json_output_parses_back() {
        let report = evaluate(&[], &[]);
        let output = SafetyFormatter::with_format(OutputFormat::Json).format_report(&report, None);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["overall"], "safe");
        assert_eq!(value["stats"]["totalWeight"], 0.0);
        assert!(value["issues"].as_array().unwrap().is_empty());
    }
}
