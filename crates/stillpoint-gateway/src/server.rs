// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use stillpoint_core::{ScriptStore, StillpointError};
use stillpoint_engine::ScriptEngine;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The request orchestrator.
    pub engine: Arc<ScriptEngine>,
    /// Direct store handle for the admin endpoints.
    pub store: Arc<dyn ScriptStore>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Bearer token for auth (None = auth disabled).
    pub bearer_token: Option<String>,
}

/// Build the full route tree.
///
/// - GET /health (unauthenticated, for liveness probes)
/// - POST /v1/scripts (with auth)
/// - POST /v1/admin/cache/clear (with auth)
/// - GET /v1/admin/cache/entries (with auth)
pub fn build_router(state: AppState, auth: AuthConfig) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/scripts", post(handlers::post_scripts))
        .route("/v1/admin/cache/clear", post(handlers::post_cache_clear))
        .route("/v1/admin/cache/entries", get(handlers::get_cache_entries))
        .route_layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server and serve until shutdown.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), StillpointError> {
    if config.bearer_token.is_none() {
        warn!("no bearer token configured -- the API is unauthenticated");
    }
    let auth = AuthConfig {
        bearer_token: config.bearer_token.clone(),
    };
    let app = build_router(state, auth);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StillpointError::Internal(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| StillpointError::Internal(format!("server error: {e}")))
}
