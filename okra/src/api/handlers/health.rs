use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct WelcomeMessage {
    pub message: String,
}

/// `GET /`
///
/// Liveness probe. Always returns the fixed welcome payload with no side
/// effects, regardless of prior request history.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = WelcomeMessage),
    )
)]
pub async fn welcome() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: "Welcome to the OCR API!".to_string(),
    })
}
