//! Resource resolution and reply construction.
//!
//! # Responsibilities
//! - Route the resource to an entity kind and ID
//! - Load the entity once and render it, or echo an unrouted resource
//! - Wrap the fragment in the envelope
//!
//! # Design Decisions
//! - Every reachable resource gets 200 + XML
//! - IDs too large for `i64` are answered as invalid without a query
//! - Storage failures are logged at error level and answered as invalid
//! - No state survives a request; safe to call from many threads

use std::sync::Arc;
use std::time::Instant;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::entity::{Entity, EntityKind};
use crate::observability::metrics::{self, RequestOutcome};
use crate::routing::{Resolution, ResourceRouter};
use crate::store::RowSource;
use crate::xml;

pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// A complete reply for the HTTP collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn xml(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: XML_CONTENT_TYPE,
            body,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}

/// Answers one resource at a time against a shared row source.
pub struct Responder {
    router: ResourceRouter,
    source: Arc<dyn RowSource>,
}

impl Responder {
    pub fn new(router: ResourceRouter, source: Arc<dyn RowSource>) -> Self {
        Self { router, source }
    }

    /// Build the reply for `resource` (path plus optional query string).
    ///
    /// Blocks on the row source; call from a blocking-capable thread.
    pub fn respond(&self, resource: &str) -> Reply {
        let start = Instant::now();

        let (label, fragment, outcome) = match self.router.resolve(resource) {
            Resolution::Entity { kind, id } => {
                let (fragment, outcome) = self.entity_fragment(kind, id);
                (kind.tag(), fragment, outcome)
            }
            Resolution::OutOfRange { kind, digits } => {
                tracing::debug!(kind = %kind, id = %digits, "ID out of range");
                (
                    kind.tag(),
                    xml::render_invalid(kind.tag(), &digits),
                    RequestOutcome::Invalid,
                )
            }
            Resolution::Unrouted => (
                "resource",
                xml::render_resource(resource),
                RequestOutcome::Unrouted,
            ),
        };

        metrics::record_request(label, outcome, start);
        tracing::debug!(
            resource = %resource,
            outcome = outcome.as_str(),
            "Resource answered"
        );

        Reply::xml(xml::envelope(&fragment))
    }

    fn entity_fragment(&self, kind: EntityKind, id: i64) -> (String, RequestOutcome) {
        let (entity, synced) = Entity::load(kind, id, self.source.as_ref());
        let outcome = match synced {
            Ok(true) => RequestOutcome::Valid,
            Ok(false) => RequestOutcome::Invalid,
            Err(e) => {
                tracing::error!(kind = %kind, id, error = %e, "Entity sync failed");
                RequestOutcome::Error
            }
        };
        (xml::render(&entity), outcome)
    }
}
