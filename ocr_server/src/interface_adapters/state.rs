use crate::domain::{Language, OcrProvider};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub ocr: Arc<dyn OcrProvider>,
    pub default_language: &'static Language,
    pub max_image_bytes: usize,
    // Empty list allows any origin.
    pub cors_allowed_origins: Vec<String>,
}
