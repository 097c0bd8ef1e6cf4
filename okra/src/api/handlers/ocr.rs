use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::error::{OkraError, Result};
use crate::ocr::decode_image;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ExtractTextResponse {
    pub extracted_text: String,
}

/// `POST /ocr/`
///
/// Accepts one multipart file upload (any field name) and returns the text
/// the OCR engine recognized in it. The request counter increments before
/// anything else, so failed requests still count as received; the duration
/// histogram observes the read+decode+recognize span on every exit,
/// success or failure.
#[utoipa::path(
    post,
    path = "/ocr/",
    tag = "ocr",
    request_body(content_type = "multipart/form-data", content = String, description = "One file field carrying raw image bytes; the field name is not inspected"),
    responses(
        (status = 200, description = "Recognized text", body = ExtractTextResponse),
        (status = 400, description = "Upload unreadable or not a decodable image"),
        (status = 500, description = "OCR engine failed"),
        (status = 504, description = "OCR engine timed out"),
    )
)]
pub async fn extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>> {
    state.metrics.record_request();

    let started = Instant::now();
    let result = run_extraction(&state, &mut multipart).await;
    state
        .metrics
        .observe_ocr_duration(started.elapsed().as_secs_f64());

    let extracted_text = result?;
    Ok(Json(ExtractTextResponse { extracted_text }))
}

async fn run_extraction(state: &AppState, multipart: &mut Multipart) -> Result<String> {
    let bytes = read_upload(multipart, state.config.ocr.max_upload_bytes).await?;

    // Decoding is CPU-bound; keep it off the async scheduler.
    let image = tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| OkraError::Engine(format!("Decode task panicked: {e}")))??;

    state.engine.recognize(image).await
}

/// Read the first multipart field into memory. The field name is not
/// inspected; the upload's content is all that matters.
async fn read_upload(multipart: &mut Multipart, max_bytes: usize) -> Result<Vec<u8>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| OkraError::Io(format!("Failed to read multipart body: {e}")))?
        .ok_or_else(|| OkraError::Io("No file provided".to_string()))?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| OkraError::Io(format!("Failed to read file: {e}")))?;

    if bytes.len() > max_bytes {
        return Err(OkraError::Io(format!(
            "File too large: {} bytes (max {} bytes)",
            bytes.len(),
            max_bytes
        )));
    }

    Ok(bytes.to_vec())
}
