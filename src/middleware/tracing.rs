// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates request IDs and creates spans for all HTTP requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::{HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::{field, info_span, Span};
use uuid::Uuid;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generate a new request id in the `req_<uuid>` format
#[must_use]
pub fn new_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Request id generator for `SetRequestIdLayer`
///
/// Incoming requests that already carry `x-request-id` keep their id.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanRequestId;

impl MakeRequestId for PlanRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&new_request_id())
            .ok()
            .map(RequestId::new)
    }
}

/// Create a tracing span for HTTP requests
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        status_code = field::Empty,
        duration_ms = field::Empty,
    )
}

/// Extract the request id a handler received
#[must_use]
pub fn request_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_format() {
        let id = new_request_id();
        assert!(id.starts_with("req_"));
        assert_eq!(id.len(), 4 + 32);
    }

    #[test]
    fn test_request_id_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id_from_headers(&headers), None);
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req_abc"));
        assert_eq!(request_id_from_headers(&headers).as_deref(), Some("req_abc"));
    }
}
