//! Verthandi HTTP service.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────┐
//!                  │                      VERTHANDI                        │
//!                  │                                                       │
//!   Client Request │  ┌─────────┐    ┌─────────┐    ┌──────────────┐      │
//!   ───────────────┼─▶│   net   │───▶│  http   │───▶│   routing    │      │
//!                  │  │listener │    │ server  │    │ (kind, id)   │      │
//!                  │  └─────────┘    └─────────┘    └──────┬───────┘      │
//!                  │                                       ▼              │
//!                  │                                ┌──────────────┐      │
//!                  │                                │    entity    │◀─────┼── store
//!                  │                                │    sync      │      │  (SQLite)
//!                  │                                └──────┬───────┘      │
//!                  │                                       ▼              │
//!   Client Response│  ┌─────────┐    ┌─────────┐    ┌──────────────┐      │
//!   ◀──────────────┼──│ 200 XML │◀───│envelope │◀───│  xml render  │      │
//!                  │  └─────────┘    └─────────┘    └──────────────┘      │
//!                  └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use verthandi::lifecycle;
use verthandi::observability::logging;

#[derive(Debug, Parser)]
#[command(name = "verthandi", version)]
#[command(about = "Serve projects and tasks from a SQLite database as XML", long_about = None)]
struct Cli {
    /// Listen address (`host:port`) or Unix domain socket path.
    socket: String,

    /// SQLite database file.
    database: PathBuf,

    /// Optional TOML configuration file. The positional arguments win.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match lifecycle::resolve_config(cli.config.as_deref(), &cli.socket, &cli.database)
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match lifecycle::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
