// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, span creation, and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cross-origin resource sharing
pub mod cors;
/// Request ids and request spans
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing and correlation
pub use self::tracing::{
    create_request_span, new_request_id, request_id_from_headers, PlanRequestId,
    REQUEST_ID_HEADER,
};
