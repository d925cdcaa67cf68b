//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP / Unix connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → responder.rs (route, load entity, render, envelope)
//!     → 200 text/xml reply
//! ```

pub mod request;
pub mod responder;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use responder::{Reply, Responder, XML_CONTENT_TYPE};
pub use server::HttpServer;
