use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OkraError {
    #[error("Upload error: {0}")]
    Io(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("OCR timed out after {0} seconds")]
    Timeout(u64),
}

impl OkraError {
    /// Stable machine-readable discriminator carried in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            OkraError::Io(_) => "io_error",
            OkraError::Decode(_) => "decode_error",
            OkraError::Engine(_) => "engine_error",
            OkraError::Timeout(_) => "timeout",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            OkraError::Io(_) => StatusCode::BAD_REQUEST,
            OkraError::Decode(_) => StatusCode::BAD_REQUEST,
            OkraError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OkraError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Generic caller-facing message. The detailed cause (engine stderr,
    /// codec error text) goes to the logs, never over the wire.
    fn public_message(&self) -> &'static str {
        match self {
            OkraError::Io(_) => "Failed to read the uploaded file",
            OkraError::Decode(_) => "Uploaded payload is not a decodable image",
            OkraError::Engine(_) => "OCR engine failed to process the image",
            OkraError::Timeout(_) => "OCR engine timed out",
        }
    }
}

impl IntoResponse for OkraError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            OkraError::Io(msg) | OkraError::Decode(msg) => {
                tracing::warn!(kind = self.kind(), "{}", msg)
            }
            OkraError::Engine(msg) => tracing::error!(kind = self.kind(), "{}", msg),
            OkraError::Timeout(secs) => {
                tracing::error!(kind = self.kind(), "OCR timed out after {} seconds", secs)
            }
        }

        let body = Json(json!({
            "error": self.public_message(),
            "kind": self.kind(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, OkraError>;
