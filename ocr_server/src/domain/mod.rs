mod errors;
mod image;
mod language;
mod ocr;

// Re-export the domain boundary types and ports.
pub use errors::OcrError;
pub use image::{ImageKind, ImageUpload};
pub use language::{DEFAULT_LANGUAGE_CODE, Language, SUPPORTED_LANGUAGES, find_language};
pub use ocr::{OcrProvider, OcrRequest};
