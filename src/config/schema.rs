//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VerthandiConfig {
    /// Listener configuration (TCP address or Unix socket path).
    pub listener: ListenerConfig,

    /// SQLite database settings.
    pub database: DatabaseConfig,

    /// Ordered resource routes. The first matching route wins.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for VerthandiConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            database: DatabaseConfig::default(),
            routes: default_routes(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Either a `host:port` socket address or a filesystem path for a Unix
    /// domain socket.
    pub bind: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: String,

    /// How long a query waits on a locked database before failing.
    pub busy_timeout_ms: u64,

    /// Create the database file if it does not exist yet.
    pub create_if_missing: bool,

    /// Create the `projects` and `tasks` tables when they are missing.
    pub initialize_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "verthandi.sqlite3".to_string(),
            busy_timeout_ms: 5000,
            create_if_missing: false,
            initialize_schema: true,
        }
    }
}

/// Route configuration mapping a path prefix to an entity kind.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Entity kind served by this route.
    pub kind: EntityKind,

    /// Path prefix preceding the numeric ID, e.g. `/verthandi/project/`.
    pub path_prefix: String,
}

impl RouteConfig {
    pub fn new(kind: EntityKind, path_prefix: impl Into<String>) -> Self {
        Self {
            kind,
            path_prefix: path_prefix.into(),
        }
    }
}

/// Project first, then task, both under `/verthandi/`.
pub fn default_routes() -> Vec<RouteConfig> {
    EntityKind::ALL
        .iter()
        .map(|kind| RouteConfig::new(*kind, format!("/verthandi/{}/", kind.tag())))
        .collect()
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes_order() {
        let routes = default_routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0], RouteConfig::new(EntityKind::Project, "/verthandi/project/"));
        assert_eq!(routes[1], RouteConfig::new(EntityKind::Task, "/verthandi/task/"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: VerthandiConfig = toml::from_str(
            r#"
            [database]
            path = "/var/lib/verthandi/data.sqlite3"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, "/var/lib/verthandi/data.sqlite3");
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.listener.bind, "127.0.0.1:8080");
        assert_eq!(config.routes, default_routes());
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_routes_from_toml() {
        let config: VerthandiConfig = toml::from_str(
            r#"
            [[routes]]
            kind = "task"
            path_prefix = "/t/"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.routes, vec![RouteConfig::new(EntityKind::Task, "/t/")]);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
