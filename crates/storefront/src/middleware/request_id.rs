//! Request ID middleware for request tracing and correlation.
//!
//! Each request carries an id that is recorded in the tracing span, tagged
//! on the Sentry scope, and echoed back in the `x-request-id` response header.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request id we accept.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Accept an upstream id only if it is short and made of token characters,
/// so it can't inject anything into logs.
fn sanitize(candidate: &str) -> Option<&str> {
    let valid = !candidate.is_empty()
        && candidate.len() <= MAX_REQUEST_ID_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    valid.then_some(candidate)
}

/// Middleware that ensures every request has a request ID.
///
/// A well-formed `x-request-id` from an upstream proxy is reused; otherwise a
/// new UUID v4 is generated.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(sanitize)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
