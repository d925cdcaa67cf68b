//! Metrics collection and exposition.
//!
//! # Metrics
//! - `verthandi_requests_total` (counter): requests by kind, outcome
//! - `verthandi_request_duration_seconds` (histogram): latency by kind
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exporter only when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How a request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Entity found and rendered.
    Valid,
    /// No row, or an ID that cannot exist.
    Invalid,
    /// Storage failed; rendered as invalid.
    Error,
    /// No route matched; path echoed.
    Unrouted,
}

impl RequestOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestOutcome::Valid => "valid",
            RequestOutcome::Invalid => "invalid",
            RequestOutcome::Error => "error",
            RequestOutcome::Unrouted => "unrouted",
        }
    }
}

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one answered request. `kind` is the entity tag or `"resource"`.
pub fn record_request(kind: &'static str, outcome: RequestOutcome, start: Instant) {
    ::metrics::counter!(
        "verthandi_requests_total",
        "kind" => kind,
        "outcome" => outcome.as_str()
    )
    .increment(1);
    ::metrics::histogram!("verthandi_request_duration_seconds", "kind" => kind)
        .record(start.elapsed().as_secs_f64());
}
