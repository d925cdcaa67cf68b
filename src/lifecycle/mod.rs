//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Open database → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Server stops accepting → In-flight requests drain → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then storage, then listener
//! - Ordered shutdown: stop accept, drain, remove socket file

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{resolve_config, run, StartupError};
