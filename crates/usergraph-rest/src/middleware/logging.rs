//! Request logging middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Logs method, uri, status and latency of every request.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        target: "http",
        method = %method,
        uri = %uri,
        request_id = %request_id,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "HTTP request completed"
    );

    response
}
