//! Startup orchestration.
//!
//! # Responsibilities
//! - Merge the config file with command line overrides
//! - Open the database, bind the listener, install signal handling
//! - Serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, no retry
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when the database is open)

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

use crate::config::{load_config, validation::validate_config, ConfigError, VerthandiConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::{BindTarget, BoundListener, ListenerError};
use crate::observability::metrics;
use crate::store::{SqliteStore, StoreError};

/// Anything that stops the process from starting or keeps it from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("database: {0}")]
    Store(#[from] StoreError),

    #[error("listener: {0}")]
    Listener(#[from] ListenerError),

    #[error("metrics: {0}")]
    Metrics(#[from] BuildError),

    #[error("server: {0}")]
    Serve(#[from] std::io::Error),
}

/// Load the optional config file and apply the required command line
/// arguments on top of it.
pub fn resolve_config(
    config_path: Option<&Path>,
    socket: &str,
    database: &Path,
) -> Result<VerthandiConfig, ConfigError> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => VerthandiConfig::default(),
    };

    config.listener.bind = socket.to_string();
    config.database.path = database.display().to_string();

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Start every subsystem and serve until SIGINT/SIGTERM.
pub async fn run(config: VerthandiConfig) -> Result<(), StartupError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.listener.bind,
        database = %config.database.path,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "verthandi starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = SqliteStore::open(Path::new(&config.database.path), &config.database)?;

    let target = BindTarget::parse(&config.listener.bind);
    let listener = BoundListener::bind(&target).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_task = signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, Arc::new(store));
    let served = server.run(listener, server_shutdown).await;
    signal_task.abort();
    served?;

    tracing::info!("Shutdown complete");
    Ok(())
}
