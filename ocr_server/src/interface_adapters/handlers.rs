use crate::domain::{ImageUpload, OcrError, SUPPORTED_LANGUAGES};
use crate::interface_adapters::protocol::{ErrorResponse, LanguagesResponse, RecognizeResponse};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{RecognizeCommand, RecognizeUseCase};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use std::sync::Arc;

type ApiError = (StatusCode, Json<ErrorResponse>);

// Fields collected from the recognize multipart form.
#[derive(Default)]
struct RecognizeForm {
    image: Option<ImageUpload>,
    language: Option<String>,
}

// Handler for recognizing text on an uploaded image.
#[tracing::instrument(name = "recognize", skip_all)]
pub async fn recognize(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<RecognizeResponse>, ApiError> {
    let form = read_recognize_form(&mut multipart).await?;
    let Some(image) = form.image else {
        return Err(error_response(StatusCode::BAD_REQUEST, "image is required"));
    };

    tracing::debug!(
        file_name = ?image.file_name,
        content_type = ?image.content_type,
        bytes = image.len(),
        "image received"
    );

    let use_case = RecognizeUseCase {
        provider: state.ocr.clone(),
        default_language: state.default_language,
        max_image_bytes: state.max_image_bytes,
    };

    let result = use_case
        .execute(RecognizeCommand {
            image,
            language: form.language,
        })
        .await
        .map_err(map_ocr_error)?;

    let seconds = result.processing_time.as_secs_f64();
    tracing::info!(
        language = result.language.code,
        chars = result.text.chars().count(),
        elapsed_ms = result.processing_time.as_millis() as u64,
        "text recognized."
    );

    Ok(Json(RecognizeResponse {
        text: result.text,
        language: result.language.name.to_string(),
        detected_language: result.language.code.to_string(),
        processing_time: format!("{seconds:.2} seconds"),
        processing_time_ms: result.processing_time.as_millis() as u64,
    }))
}

// Handler listing the languages the gateway accepts.
pub async fn languages() -> Json<LanguagesResponse> {
    let languages = SUPPORTED_LANGUAGES
        .iter()
        .map(|language| (language.code.to_string(), language.name.to_string()))
        .collect();
    Json(languages)
}

pub async fn health() -> &'static str {
    "ok"
}

async fn read_recognize_form(multipart: &mut Multipart) -> Result<RecognizeForm, ApiError> {
    let mut form = RecognizeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(map_multipart_error)?;
                form.image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    file_name,
                    content_type,
                });
            }
            "language" => {
                form.language = Some(field.text().await.map_err(map_multipart_error)?);
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn map_multipart_error(err: MultipartError) -> ApiError {
    tracing::warn!(error = %err, "malformed multipart body");
    error_response(err.status(), &err.body_text())
}

// Maps domain errors to HTTP responses; OCR service messages are passed through.
fn map_ocr_error(err: OcrError) -> ApiError {
    let status = match &err {
        OcrError::EmptyImage | OcrError::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
        OcrError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        OcrError::Transport(_)
        | OcrError::Upstream { .. }
        | OcrError::Service(_)
        | OcrError::Decode(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "failed to recognize text.");
    } else {
        tracing::warn!(error = %err, "rejected recognize request.");
    }

    error_response(status, &err.to_string())
}
