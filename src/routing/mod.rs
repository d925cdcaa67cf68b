//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming resource (path + query)
//!     → router.rs (ordered route scan)
//!     → matcher.rs (prefix + digit run)
//!     → Return: Entity { kind, id }, OutOfRange, or Unrouted
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Compile matchers in declaration order
//!     → Freeze as immutable ResourceRouter
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod matcher;
pub mod router;

pub use router::{Resolution, ResourceRouter};
