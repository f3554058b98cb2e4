//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router and wire middleware (trace, request ID, timeout)
//! - Dispatch: forward rules first, dev introspection, then SPA fallback
//! - Serve with graceful shutdown
//!
//! # Dispatch order
//! A request whose path matches a forward rule is delivered upstream and its
//! response returned verbatim. Everything else belongs to the app: GET/HEAD
//! get the entry document (or a dev asset), other methods get 404.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::DevServerConfig;
use crate::http::request::{request_id, RequestIdLayer};
use crate::http::spa::SpaState;
use crate::observability::metrics;
use crate::proxy::Forwarder;
use crate::routing::RouteTable;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub forwarder: Arc<Forwarder>,
    pub spa: Arc<SpaState>,
}

/// The dev server.
pub struct HttpServer {
    router: Router,
    config: DevServerConfig,
}

impl HttpServer {
    /// Create a new server from validated configuration and compiled parts.
    pub fn new(config: DevServerConfig, table: Arc<RouteTable>, forwarder: Arc<Forwarder>) -> Self {
        let state = AppState {
            table,
            forwarder,
            spa: Arc::new(SpaState::from_config(&config.spa)),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &DevServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Dev server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("Dev server stopped");
        Ok(())
    }

    pub fn config(&self) -> &DevServerConfig {
        &self.config
    }
}

/// Main dispatch handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let id = request_id(request.headers()).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if let Some(rule) = state.forwarder.match_rule(&path) {
        return match state.forwarder.forward(rule, request).await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(
                    request_id = %id,
                    path = %path,
                    status = %status,
                    "Upstream response passed through"
                );
                metrics::record_request(method.as_str(), status.as_u16(), "forward", start);
                response
            }
            Err(e) => {
                tracing::error!(request_id = %id, path = %path, error = %e, "Upstream unreachable");
                metrics::record_request(method.as_str(), 502, "forward", start);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("upstream request failed: {e}"),
                )
                    .into_response()
            }
        };
    }

    if method == Method::GET && path == "/__dev/routes" {
        metrics::record_request(method.as_str(), 200, "introspection", start);
        return Json(state.table.entries().to_vec()).into_response();
    }

    if method == Method::GET || method == Method::HEAD {
        let response = state.spa.respond(&path).await;
        metrics::record_request(method.as_str(), response.status().as_u16(), "spa", start);
        return response;
    }

    tracing::debug!(request_id = %id, method = %method, path = %path, "No handler for request");
    metrics::record_request(method.as_str(), 404, "none", start);
    (StatusCode::NOT_FOUND, "No matching route").into_response()
}

/// Resolve when either the coordinator fires or Ctrl+C arrives.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = shutdown.recv() => {
            tracing::info!("Shutdown signal received");
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Ctrl+C received");
            }
        }
    }
}
