pub mod history;
pub mod pages;

use crate::domain::FrontError;
use crate::interface_adapters::views;
use axum::{http::StatusCode, response::Html};

pub use history::{clear, compare, delete, export_csv, export_txt, health, image, stats};
pub use pages::{index, recognize};

// HTML error page with its status; every browser-facing handler returns this.
pub type PageError = (StatusCode, Html<String>);

pub(crate) fn page_error(status: StatusCode, message: &str) -> PageError {
    (status, Html(views::error_page(message)))
}

// Maps front-end errors to HTTP responses; OCR messages are shown verbatim.
pub(crate) fn map_front_error(err: FrontError) -> PageError {
    let status = match &err {
        FrontError::DisallowedExtension(_) | FrontError::FileTooLarge { .. } => {
            StatusCode::BAD_REQUEST
        }
        FrontError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        FrontError::Recognition(_) => StatusCode::BAD_GATEWAY,
        FrontError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        FrontError::HistoryNotFound(_) => StatusCode::NOT_FOUND,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "request failed.");
    } else {
        tracing::warn!(error = %err, "request rejected.");
    }

    page_error(status, &err.to_string())
}
