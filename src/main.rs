//! Shelf Designer - command line tools for box-module shelving designs.
//!
//! Creates design documents from templates, checks them for structural
//! issues and exports bills of materials.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shelf_designer::cli::{BomArgs, CheckArgs, ConfigArgs, NewArgs};
use shelf_designer::constants::APP_BINARY_NAME;

/// Shelf Designer - box-module shelving configurator
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new design from a template
    New(NewArgs),
    /// Check a design for structural issues
    Check(CheckArgs),
    /// Export the bill of materials as CSV
    Bom(BomArgs),
    /// Show configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match &cli.command {
        Command::New(args) => args.execute(),
        Command::Check(args) => args.execute(),
        Command::Bom(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code().code());
    }
}
