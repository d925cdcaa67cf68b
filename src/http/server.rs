//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all resource handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Serve on a TCP or Unix listener until shutdown
//! - Run the responder on the blocking pool

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::VerthandiConfig;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::responder::Responder;
use crate::net::BoundListener;
use crate::routing::ResourceRouter;
use crate::store::RowSource;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<Responder>,
}

/// HTTP front end for the resource responder.
pub struct HttpServer {
    router: Router,
    config: VerthandiConfig,
}

impl HttpServer {
    /// Create a new HTTP server reading from `source`.
    pub fn new(config: VerthandiConfig, source: Arc<dyn RowSource>) -> Self {
        let resources = ResourceRouter::from_config(&config.routes);
        let state = AppState {
            responder: Arc::new(Responder::new(resources, source)),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &VerthandiConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        resource = %request.uri(),
                        request_id = %request_id(request)
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));

        Router::new()
            .route("/", any(resource_handler))
            .route("/{*path}", any(resource_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// The configured router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &VerthandiConfig {
        &self.config
    }

    /// Serve until `shutdown` fires (or its sender is dropped).
    pub async fn run(
        self,
        listener: BoundListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %listener.describe(), "HTTP server starting");

        let signal = async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
        };

        match listener {
            BoundListener::Tcp(listener) => {
                axum::serve(listener, self.router)
                    .with_graceful_shutdown(signal)
                    .await?;
            }
            #[cfg(unix)]
            BoundListener::Unix { listener, path } => {
                let served = axum::serve(listener, self.router)
                    .with_graceful_shutdown(signal)
                    .await;
                crate::net::listener::remove_socket_file(&path);
                served?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: every method, every resource.
async fn resource_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let resource = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let responder = state.responder.clone();
    match tokio::task::spawn_blocking(move || responder.respond(&resource)).await {
        Ok(reply) => reply.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Responder task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
