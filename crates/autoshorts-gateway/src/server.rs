// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.

use std::sync::Arc;

use autoshorts_core::AutoshortsError;
use autoshorts_pipeline::Pipeline;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub pipeline: Arc<Pipeline>,
}

/// Gateway server configuration (mirrors `GatewayConfig` from autoshorts-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the gateway routes:
/// - GET /health
/// - GET|POST /api/cron/daily-upload
/// - GET|POST /v1/runs
/// - GET /v1/runs/{id}
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route(
            "/api/cron/daily-upload",
            get(handlers::cron_daily_upload).post(handlers::cron_daily_upload),
        )
        .route("/v1/runs", get(handlers::list_runs).post(handlers::create_run))
        .route("/v1/runs/{id}", get(handlers::get_run))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds to the configured address and serves until the process exits.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
) -> Result<(), AutoshortsError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AutoshortsError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AutoshortsError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
