//! Configuration display.

use clap::Args;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;

/// Show the effective configuration
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Print only the configuration file path
    #[arg(long)]
    pub path: bool,

    /// Output as JSON instead of TOML
    #[arg(long, conflicts_with = "path")]
    pub json: bool,
}

impl ConfigArgs {
    /// Execute the config command
    pub fn execute(&self) -> CliResult<()> {
        if self.path {
            let path = Config::config_file_path()
                .map_err(|e| CliError::io(format!("Failed to resolve config path: {e}")))?;
            println!("{}", path.display());
            return Ok(());
        }

        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let output = if self.json {
            serde_json::to_string_pretty(&config).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?
        } else {
            toml::to_string_pretty(&config)
                .map_err(|e| CliError::io(format!("Failed to serialize configuration: {e}")))?
        };
        println!("{output}");
        Ok(())
    }
}
