//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in configuration order
//! - Resolve a resource to an entity kind and ID, or to no route
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan, first match wins
//! - Explicit `Unrouted` rather than an error: the caller echoes the path

use crate::config::schema::{default_routes, RouteConfig};
use crate::entity::EntityKind;
use crate::routing::matcher::{Matcher, ResourcePathMatcher};

/// Outcome of routing one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A route matched and the ID fits the storage integer type.
    Entity { kind: EntityKind, id: i64 },

    /// A route matched but the digit run does not fit in `i64`.
    OutOfRange { kind: EntityKind, digits: String },

    /// No route matched.
    Unrouted,
}

#[derive(Debug)]
struct Route {
    kind: EntityKind,
    matcher: Box<dyn Matcher>,
}

/// Ordered resource routes.
#[derive(Debug)]
pub struct ResourceRouter {
    routes: Vec<Route>,
}

impl ResourceRouter {
    /// Compile routes, keeping their order.
    pub fn from_config(configs: &[RouteConfig]) -> Self {
        let routes = configs
            .iter()
            .map(|config| Route {
                kind: config.kind,
                matcher: Box::new(ResourcePathMatcher::new(config.path_prefix.clone())),
            })
            .collect::<Vec<_>>();

        tracing::debug!(routes = routes.len(), "Resource routes compiled");
        Self { routes }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve a resource against the routes in order.
    pub fn resolve(&self, resource: &str) -> Resolution {
        for route in &self.routes {
            if let Some(digits) = route.matcher.capture(resource) {
                // Only ASCII digits reach here, so the sole failure is overflow.
                return match digits.parse::<i64>() {
                    Ok(id) => Resolution::Entity {
                        kind: route.kind,
                        id,
                    },
                    Err(_) => Resolution::OutOfRange {
                        kind: route.kind,
                        digits: digits.to_string(),
                    },
                };
            }
        }
        Resolution::Unrouted
    }
}

impl Default for ResourceRouter {
    fn default() -> Self {
        Self::from_config(&default_routes())
    }
}
