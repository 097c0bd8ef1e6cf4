#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use okra::api::AppState;
use okra::config::{Config, OcrConfig, ServerConfig};
use okra::metrics::Metrics;
use okra::ocr::TesseractEngine;

pub const BOUNDARY: &str = "okra-test-boundary";

pub fn test_config(engine_path: &str, timeout_secs: u64, max_upload_bytes: usize) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        },
        ocr: OcrConfig {
            engine_path: engine_path.to_string(),
            languages: "eng".to_string(),
            timeout_secs,
            max_workers: 4,
            max_upload_bytes,
        },
    }
}

pub fn test_state(engine_path: &str, timeout_secs: u64) -> AppState {
    let config = test_config(engine_path, timeout_secs, 10 * 1024 * 1024);
    let engine = TesseractEngine::new(&config.ocr);
    AppState::new(config, engine, Metrics::new())
}

pub fn test_state_with_upload_cap(engine_path: &str, max_upload_bytes: usize) -> AppState {
    let config = test_config(engine_path, 5, max_upload_bytes);
    let engine = TesseractEngine::new(&config.ocr);
    AppState::new(config, engine, Metrics::new())
}

pub fn encode_png(img: &DynamicImage) -> Vec<u8> {
    let mut output = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
        .unwrap();
    output
}

/// Deterministic pseudo-noise image; distinct dimensions give clearly
/// distinct PNG payloads.
pub fn noise_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 31 + y * 17) % 251) as u8,
            ((x * 7 + y * 13) % 241) as u8,
            ((x * 3 + y * 29) % 239) as u8,
        ])
    });
    encode_png(&DynamicImage::ImageRgb8(img))
}

pub fn white_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    encode_png(&DynamicImage::ImageRgb8(img))
}

pub fn multipart_body(field_name: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; \
             name=\"{field_name}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn ocr_request(bytes: &[u8]) -> Request<Body> {
    ocr_request_with_field("file", bytes)
}

pub fn ocr_request_with_field(field_name: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ocr/")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field_name, "upload.png", bytes)))
        .unwrap()
}

/// A multipart request carrying no parts at all.
pub fn empty_ocr_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ocr/")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(format!("--{BOUNDARY}--\r\n")))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Write an executable shell script standing in for the OCR engine. The
/// engine contract passes `<file> stdout -l <languages>`, so `$1` is the
/// input path inside the script. Returns the tempdir (keep it alive) and
/// the script path.
#[cfg(unix)]
pub fn fake_engine(script_body: &str) -> (tempfile::TempDir, String) {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake-tesseract");
    std::fs::write(&path, format!("#!/bin/sh\n{script_body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    (dir, path.to_string_lossy().into_owned())
}
