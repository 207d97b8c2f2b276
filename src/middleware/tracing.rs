use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};

/// Wraps every request in a span carrying a fresh request id, and logs
/// status and latency on the way out.
pub async fn observability_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str())
        .unwrap_or("unmatched")
        .to_string();
    let start_time = Instant::now();

    let span = info_span!(
        "http_request",
        method = %method,
        route = %route,
        request_id = %uuid::Uuid::now_v7(),
    );

    let response = next.run(request).instrument(span).await;

    let latency_ms = start_time.elapsed().as_millis();
    let status = response.status().as_u16();
    info!(%method, %route, status, latency_ms, "request completed");

    response
}
