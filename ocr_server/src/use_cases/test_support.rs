use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{OcrError, OcrProvider, OcrRequest};

// Captured view of a request the fake provider received.
#[derive(Debug, Clone)]
pub(crate) struct SeenRequest {
    pub language_code: &'static str,
    pub ocr_space_code: &'static str,
    pub byte_len: usize,
}

// Fake OCR provider returning a canned answer and recording every call.
#[derive(Clone)]
pub(crate) struct RecordingProvider {
    answer: Result<String, OcrError>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl RecordingProvider {
    pub(crate) fn answering(text: impl Into<String>) -> Self {
        Self {
            answer: Ok(text.into()),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn failing(error: OcrError) -> Self {
        Self {
            answer: Err(error),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("seen mutex poisoned").clone()
    }
}

#[async_trait]
impl OcrProvider for RecordingProvider {
    async fn recognize(&self, request: OcrRequest) -> Result<String, OcrError> {
        let mut guard = self.seen.lock().expect("seen mutex poisoned");
        guard.push(SeenRequest {
            language_code: request.language.code,
            ocr_space_code: request.language.ocr_space_code,
            byte_len: request.image.len(),
        });
        self.answer.clone()
    }
}
