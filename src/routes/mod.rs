// ABOUTME: Route module organization for the Fitplan HTTP endpoints
// ABOUTME: Plan generation plus health and readiness probes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Fitplan server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Health check and readiness routes
pub mod health;
/// Weekly plan generation routes
pub mod plans;

/// Health route handlers
pub use health::HealthRoutes;
/// Plan route handlers and request types
pub use plans::{AgeField, PlanRequest, PlanRoutes, PLAN_SOURCE_HEADER};
