//! Shelf Designer Web Server Binary
//!
//! Starts the design store REST API used by the browser configurator.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from config.toml (port 3001 by default)
//! shelf-designer-web
//!
//! # Specify port and designs directory
//! shelf-designer-web --port 8080 --designs-dir ~/shelves
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelf_designer::config::Config;
use shelf_designer::web;

/// Shelf Designer Web Server - REST API for saved designs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on [default: server.port from config, 3001]
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to [default: server.host from config, 127.0.0.1]
    #[arg(long)]
    host: Option<String>,

    /// Directory holding saved designs.
    /// Defaults to `paths.designs_dir` from config, or the platform data
    /// directory (e.g. ~/.local/share/ShelfDesigner/designs/).
    #[arg(short, long)]
    designs_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().unwrap_or_default();

    let designs_dir = match args.designs_dir {
        Some(path) => path,
        None => config.designs_dir()?,
    };
    info!("Designs directory: {}", designs_dir.display());

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    web::run_server(designs_dir, addr).await
}
