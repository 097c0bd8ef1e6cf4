use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use image::{DynamicImage, ImageFormat};
use tempfile::NamedTempFile;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::config::OcrConfig;
use crate::error::{OkraError, Result};

/// External OCR engine invoked as a subprocess.
///
/// The decoded image is re-encoded to PNG in a temp file and the configured
/// executable runs as `<engine> <file> stdout -l <languages>`. Engine runs
/// are bounded by a semaphore so a burst of slow scans queues at the engine
/// instead of exhausting the process, and each invocation is capped by the
/// configured timeout. The subprocess is killed if the invocation is
/// abandoned mid-flight.
#[derive(Clone)]
pub struct TesseractEngine {
    config: OcrConfig,
    permits: Arc<Semaphore>,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            config: config.clone(),
            permits: Arc::new(Semaphore::new(config.max_workers.max(1))),
        }
    }

    /// Check whether the configured executable is runnable. Used as a
    /// startup availability probe; requests still attempt the engine and
    /// fail per request when it is missing.
    pub async fn probe(&self) -> Result<()> {
        let output = Command::new(&self.config.engine_path)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                OkraError::Engine(format!(
                    "Failed to run '{} --version': {e}",
                    self.config.engine_path
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OkraError::Engine(format!(
                "'{} --version' exited with {}: {}",
                self.config.engine_path,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }

    /// Run OCR on a decoded image, returning the recognized text.
    ///
    /// An engine that runs successfully but recognizes nothing yields an
    /// empty string, not an error. The timeout covers the whole invocation
    /// including queue wait for a worker permit.
    pub async fn recognize(&self, image: DynamicImage) -> Result<String> {
        let timeout = Duration::from_secs(self.config.timeout_secs);

        match tokio::time::timeout(timeout, self.recognize_inner(image)).await {
            Ok(result) => result,
            Err(_) => Err(OkraError::Timeout(self.config.timeout_secs)),
        }
    }

    async fn recognize_inner(&self, image: DynamicImage) -> Result<String> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| OkraError::Engine(format!("Worker pool closed: {e}")))?;

        // PNG encoding is CPU-bound; keep it off the async scheduler.
        let input = tokio::task::spawn_blocking(move || write_engine_input(&image))
            .await
            .map_err(|e| OkraError::Engine(format!("Image encoding task panicked: {e}")))??;

        debug!(
            engine = %self.config.engine_path,
            languages = %self.config.languages,
            "Running OCR engine"
        );

        let output = Command::new(&self.config.engine_path)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.languages)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                OkraError::Engine(format!(
                    "Failed to run OCR engine '{}': {e}",
                    self.config.engine_path
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OkraError::Engine(format!(
                "OCR engine '{}' exited with {}: {}",
                self.config.engine_path,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|e| OkraError::Engine(format!("Engine produced invalid UTF-8: {e}")))?;

        Ok(text.trim().to_string())
    }
}

/// Write the decoded image as a PNG temp file for the engine to read.
/// The file is removed when the returned handle drops.
fn write_engine_input(image: &DynamicImage) -> Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix("okra-ocr-")
        .suffix(".png")
        .tempfile()
        .map_err(|e| OkraError::Engine(format!("Failed to create engine input file: {e}")))?;

    let mut buffer = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| OkraError::Engine(format!("Failed to encode engine input: {e}")))?;

    std::fs::write(file.path(), &buffer)
        .map_err(|e| OkraError::Engine(format!("Failed to write engine input file: {e}")))?;

    Ok(file)
}
