use std::fmt;

// Domain-level errors for the recognize workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    EmptyImage,
    ImageTooLarge { size: usize, limit: usize },
    UnsupportedLanguage(String),
    // The OCR service could not be reached or timed out.
    Transport(String),
    // The OCR service answered with a non-success HTTP status.
    Upstream { status: u16, message: Option<String> },
    // The OCR service processed the request but reported an error.
    Service(String),
    // The OCR service answered with a body we could not parse.
    Decode(String),
}

impl fmt::Display for OcrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcrError::EmptyImage => write!(f, "image is empty"),
            OcrError::ImageTooLarge { size, limit } => {
                write!(f, "image is too large: {size} bytes (limit {limit})")
            }
            OcrError::UnsupportedLanguage(code) => write!(f, "unsupported language: {code}"),
            OcrError::Transport(message) => write!(f, "ocr transport error: {message}"),
            OcrError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "ocr upstream error {status}: {message}")
                } else {
                    write!(f, "ocr upstream error {status}")
                }
            }
            OcrError::Service(message) => write!(f, "{message}"),
            OcrError::Decode(message) => write!(f, "ocr response decode error: {message}"),
        }
    }
}

impl std::error::Error for OcrError {}
