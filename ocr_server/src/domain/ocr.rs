use async_trait::async_trait;

use crate::domain::{ImageUpload, Language, OcrError};

// A single recognition request handed to the OCR port.
#[derive(Debug, Clone)]
pub struct OcrRequest {
    pub image: ImageUpload,
    pub language: &'static Language,
}

// The use case depends on this trait, not on the OCR.space client.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    // Returns the raw recognized text for the image.
    async fn recognize(&self, request: OcrRequest) -> Result<String, OcrError>;
}

// Lets handlers pass the shared `Arc<dyn OcrProvider>` straight into use cases.
#[async_trait]
impl<T> OcrProvider for std::sync::Arc<T>
where
    T: OcrProvider + ?Sized,
{
    async fn recognize(&self, request: OcrRequest) -> Result<String, OcrError> {
        (**self).recognize(request).await
    }
}
