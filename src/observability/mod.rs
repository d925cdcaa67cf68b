//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Responder, server, startup produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID and resource flow through every request span
//! - Metrics are cheap and no-ops when no exporter is installed

pub mod logging;
pub mod metrics;
