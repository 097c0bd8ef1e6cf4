use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Engine executable. A bare name resolves through `PATH`.
    pub engine_path: String,
    pub languages: String,
    pub timeout_secs: u64,
    pub max_workers: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("OKRA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("OKRA_PORT", 8000),
            },
            ocr: OcrConfig {
                engine_path: env::var("TESSERACT_PATH")
                    .unwrap_or_else(|_| "tesseract".to_string()),
                languages: env::var("OCR_LANGUAGES").unwrap_or_else(|_| "eng".to_string()),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 30),
                max_workers: parse_env_or("OCR_MAX_WORKERS", 4),
                max_upload_bytes: parse_env_or("OCR_MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
