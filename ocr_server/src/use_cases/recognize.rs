use std::time::{Duration, Instant};

use crate::domain::{
    ImageKind, ImageUpload, Language, OcrError, OcrProvider, OcrRequest, find_language,
};

// Input for a single recognition.
pub struct RecognizeCommand {
    pub image: ImageUpload,
    // Language code chosen by the client; `None` means the configured default.
    pub language: Option<String>,
}

// Output of a successful recognition.
#[derive(Debug)]
pub struct Recognition {
    pub text: String,
    pub language: &'static Language,
    pub image_kind: ImageKind,
    pub processing_time: Duration,
}

// Recognize use case with injected OCR provider.
pub struct RecognizeUseCase<P> {
    pub provider: P,
    pub default_language: &'static Language,
    pub max_image_bytes: usize,
}

impl<P> RecognizeUseCase<P>
where
    P: OcrProvider,
{
    pub async fn execute(&self, command: RecognizeCommand) -> Result<Recognition, OcrError> {
        let started = Instant::now();

        if command.image.is_empty() {
            return Err(OcrError::EmptyImage);
        }
        if command.image.len() > self.max_image_bytes {
            return Err(OcrError::ImageTooLarge {
                size: command.image.len(),
                limit: self.max_image_bytes,
            });
        }

        let language = self.resolve_language(command.language.as_deref())?;
        let image_kind = command.image.kind();

        tracing::info!(
            language = language.ocr_space_code,
            bytes = command.image.len(),
            filetype = image_kind.filetype(),
            "sending image to ocr provider"
        );

        // Single request, no retry.
        let text = self
            .provider
            .recognize(OcrRequest {
                image: command.image,
                language,
            })
            .await?;

        Ok(Recognition {
            text: text.trim().to_string(),
            language,
            image_kind,
            processing_time: started.elapsed(),
        })
    }

    fn resolve_language(&self, code: Option<&str>) -> Result<&'static Language, OcrError> {
        match code.map(str::trim) {
            None | Some("") => Ok(self.default_language),
            Some(code) => {
                find_language(code).ok_or_else(|| OcrError::UnsupportedLanguage(code.to_string()))
            }
        }
    }
}
