use std::fmt;

// Domain-level errors for the front-end workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontError {
    DisallowedExtension(String),
    FileTooLarge { file_name: String, size: usize, limit: usize },
    BatchTooLarge { total: usize, limit: usize },
    // Message from the OCR gateway (or the service behind it), shown as-is.
    Recognition(String),
    StorageFailure(String),
    HistoryNotFound(String),
}

impl fmt::Display for FrontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontError::DisallowedExtension(file_name) => {
                write!(f, "unsupported file format: {file_name}")
            }
            FrontError::FileTooLarge {
                file_name,
                size,
                limit,
            } => write!(
                f,
                "file {file_name} is too large ({size} bytes, limit {limit})"
            ),
            FrontError::BatchTooLarge { total, limit } => {
                let limit_mib = *limit as f64 / 1024.0 / 1024.0;
                write!(
                    f,
                    "total upload size {total} bytes exceeds {limit_mib:.0} MB"
                )
            }
            FrontError::Recognition(message) => write!(f, "{message}"),
            FrontError::StorageFailure(message) => write!(f, "storage error: {message}"),
            FrontError::HistoryNotFound(id) => write!(f, "history entry {id} not found"),
        }
    }
}

impl std::error::Error for FrontError {}
