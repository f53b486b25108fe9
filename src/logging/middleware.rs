use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tracing::Instrument;

fn request_id(request: &Request) -> String {
    request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Logs each request under an `http_request` span carrying its request id.
/// The completion level follows the response status.
pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id(&request),
        method = %request.method(),
        uri = %request.uri(),
    );

    async move {
        tracing::debug!(version = ?request.version(), "incoming request");

        let response = next.run(request).await;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;

        if status.is_server_error() {
            tracing::error!(status = %status, duration_ms, "request failed");
        } else if status.is_client_error() {
            tracing::warn!(status = %status, duration_ms, "request rejected");
        } else {
            tracing::info!(status = %status, duration_ms, "request completed");
        }

        response
    }
    .instrument(span)
    .await
}

pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}
