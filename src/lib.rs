//! Verthandi: projects and tasks from SQLite, served as XML over HTTP.

pub mod config;
pub mod entity;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod store;
pub mod xml;

pub use config::VerthandiConfig;
pub use entity::{Entity, EntityKind};
pub use http::{HttpServer, Responder};
pub use lifecycle::Shutdown;
pub use store::{RowSource, SqliteStore};
