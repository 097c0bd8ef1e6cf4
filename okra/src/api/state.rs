use std::sync::Arc;

use crate::config::Config;
use crate::metrics::Metrics;
use crate::ocr::TesseractEngine;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: TesseractEngine,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: Config, engine: TesseractEngine, metrics: Metrics) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            metrics,
        }
    }
}
