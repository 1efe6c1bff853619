// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints, readiness reports the LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! This module provides health and readiness endpoints
//! for monitoring and load balancer health checks.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::constants::{routes, service_names};
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::HEALTH, get(Self::handle_health))
            .route(routes::READY, get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": service_names::FITPLAN_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339()
        }))
    }

    /// Ready even without a provider: requests then get the fallback plan
    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let provider = resources.plan_service.provider_name();
        Json(json!({
            "status": "ready",
            "llm_provider": provider,
            "fallback_only": provider.is_none(),
            "timestamp": Utc::now().to_rfc3339()
        }))
    }
}
