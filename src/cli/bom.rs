//! Bill of materials export.

use std::path::PathBuf;

use clap::Args;

use crate::cli::common::{CliError, CliResult};
use crate::export::generate_bom_csv;
use crate::persistence::LocalFiles;

/// Export the bill of materials of a design as CSV
#[derive(Debug, Clone, Args)]
pub struct BomArgs {
    /// Design JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output file, or a directory to write a timestamped file into.
    /// Prints to stdout when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl BomArgs {
    /// Execute the bom command
    pub fn execute(&self) -> CliResult<()> {
        let parsed = LocalFiles::import_json(&self.file)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        let csv = generate_bom_csv(&parsed.into_snapshot());

        match &self.output {
            Some(dir) if dir.is_dir() => {
                let path = LocalFiles::new(dir)
                    .export_bom(&csv)
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("Wrote {}", path.display());
            }
            Some(path) => {
                std::fs::write(path, &csv).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                println!("Wrote {}", path.display());
            }
            None => print!("{csv}"),
        }
        Ok(())
    }
}
