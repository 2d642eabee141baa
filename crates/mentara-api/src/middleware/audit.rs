use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Emit one `api_request` event per request with its latency.
///
/// Bodies are never logged; answers and chat messages are clinical data.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    let latency_ms = started.elapsed().as_millis() as u64;
    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms,
        "api_request"
    );
    response
}
