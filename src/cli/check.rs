//! Structural safety check for a saved design.

use std::path::PathBuf;

use clap::Args;

use crate::cli::common::{CliError, CliResult};
use crate::persistence::LocalFiles;
use crate::safety::{evaluate_snapshot, OutputFormat, SafetyFormatter, Severity, Verdict};

/// Check a design file for structural issues
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Design JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// Execute the check command. Fails with a validation error when the
    /// design is rated dangerous.
    pub fn execute(&self) -> CliResult<()> {
        let parsed = LocalFiles::import_json(&self.file)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        let title = parsed.title().map(str::to_string);
        let report = evaluate_snapshot(&parsed.into_snapshot());

        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Terminal
        };
        let output = SafetyFormatter::with_format(format).format_report(&report, title.as_deref());
        println!("{output}");

        if report.overall == Verdict::Danger {
            return Err(CliError::validation(format!(
                "Design is unsafe: {} danger issue(s) found",
                report.count(Severity::Danger)
            )));
        }
        Ok(())
    }
}
