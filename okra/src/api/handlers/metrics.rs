use axum::extract::State;
use axum::http::header::CONTENT_TYPE;

use crate::api::AppState;

/// Prometheus text exposition format, version 0.0.4.
const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// `GET /metrics`
///
/// Read-only snapshot of the request counter and duration histogram in
/// Prometheus text exposition format.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String,
         content_type = "text/plain"),
    )
)]
pub async fn metrics_exposition(
    State(state): State<AppState>,
) -> ([(axum::http::HeaderName, &'static str); 1], String) {
    ([(CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], state.metrics.gather())
}
