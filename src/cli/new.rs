//! Create a new design document from a layout template.

use std::path::PathBuf;

use clap::Args;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::DEFAULT_DESIGN_TITLE;
use crate::persistence::{to_persistable, LocalFiles};
use crate::services::{ComponentRegistry, Template};

/// Create a new design from a template
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Layout template to start from
    #[arg(short, long, value_enum, default_value_t = Template::Single)]
    pub template: Template,

    /// Design title
    #[arg(long, default_value = DEFAULT_DESIGN_TITLE)]
    pub title: String,

    /// Output file, or a directory to write a timestamped file into.
    /// Prints to stdout when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;

        let mut registry = ComponentRegistry::new(config.defaults);
        self.template.expand(&mut registry);
        let document = to_persistable(&registry.snapshot(), &self.title);

        match &self.output {
            Some(dir) if dir.is_dir() => {
                let path = LocalFiles::new(dir)
                    .export_json(&document)
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("Wrote {}", path.display());
            }
            Some(path) => {
                let json = serde_json::to_string_pretty(&document)
                    .map_err(|e| CliError::io(format!("Failed to serialize design: {e}")))?;
                std::fs::write(path, json).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                println!("Wrote {}", path.display());
            }
            None => {
                let json = serde_json::to_string_pretty(&document)
                    .map_err(|e| CliError::io(format!("Failed to serialize design: {e}")))?;
                println!("{json}");
            }
        }

        Ok(())
    }
}
