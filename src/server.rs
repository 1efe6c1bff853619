// ABOUTME: HTTP server assembly with middleware stack and graceful shutdown
// ABOUTME: Builds the axum router from shared resources and serves it on the configured address
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Server
//!
//! [`build_router`] produces the complete application so integration tests can
//! drive it with `oneshot` without binding a socket. [`run`] binds the
//! listener and serves until Ctrl+C.

use std::future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{body::Body, extract::DefaultBodyLimit, http::HeaderName, Router};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::environment::ServerConfig;
use crate::middleware::{create_request_span, setup_cors, PlanRequestId, REQUEST_ID_HEADER};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, PlanRoutes};

/// Build the application router with all middleware applied
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let cors = setup_cors(&resources.config);
    let body_limit = resources.config.max_request_body_bytes;

    Router::new()
        .merge(PlanRoutes::routes(Arc::clone(&resources)))
        .merge(HealthRoutes::routes(resources))
        // Enforced by the `Json` extractor, which rejects with 413
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    request_id_header.clone(),
                    PlanRequestId,
                ))
                .layer(TraceLayer::new_for_http().make_span_with(create_request_span::<Body>))
                .layer(PropagateRequestIdLayer::new(request_id_header))
                .layer(cors),
        )
}

/// Serve the application until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the LLM provider cannot be created, the address cannot
/// be bound, or the server fails while running
pub async fn run(config: ServerConfig) -> Result<()> {
    let address = config.bind_address();
    let resources = Arc::new(ServerResources::from_config(config)?);
    let app = build_router(resources);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Fitplan server listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Fitplan server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {e}");
        // Without a handler, keep serving until the process is killed
        future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
