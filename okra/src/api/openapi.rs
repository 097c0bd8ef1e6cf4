use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OCR API",
        version = "1.0.0",
        description = "Extract text from images using Tesseract OCR",
    ),
    paths(
        handlers::health::welcome,
        handlers::metrics::metrics_exposition,
        handlers::ocr::extract_text,
    ),
    components(schemas(
        handlers::health::WelcomeMessage,
        handlers::ocr::ExtractTextResponse,
    )),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "metrics", description = "Prometheus instrumentation"),
        (name = "ocr", description = "Text extraction from uploaded images"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
