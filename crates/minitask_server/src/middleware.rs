//! Request-scoped middleware.
//!
//! # Responsibility
//! - Assign (or preserve) an `x-request-id` header on every response.
//! - Emit one `http_request` log event per request with duration and
//!   status.
//!
//! # Invariants
//! - A caller-provided request id is echoed back unchanged.
//! - The log event never contains request bodies.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use log::info;
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Stamps a request id and logs the request outcome.
pub async fn request_context(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    let outcome = if status.is_server_error() { "error" } else { "ok" };
    info!(
        "event=http_request module=server status={outcome} method={method} path={path} http_status={} duration_ms={} request_id={request_id}",
        status.as_u16(),
        started_at.elapsed().as_millis()
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}
