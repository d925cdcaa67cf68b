//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! --socket / listener.bind
//!     → listener.rs (TCP address or Unix socket path)
//!     → BoundListener
//!     → Hand off to HTTP layer (axum::serve)
//! ```
//!
//! # Design Decisions
//! - A bind string that parses as `host:port` is TCP, anything else a path
//! - Socket files are removed on clean shutdown

pub mod listener;

pub use listener::{BindTarget, BoundListener, ListenerError};
