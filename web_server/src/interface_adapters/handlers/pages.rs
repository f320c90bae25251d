use crate::domain::{BatchOutcome, BatchSettings, UploadedFile};
use crate::interface_adapters::handlers::{PageError, map_front_error, page_error};
use crate::interface_adapters::protocol::HistoryQuery;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views::{self, IndexView};
use axum::{
    extract::{Multipart, Query, State, multipart::MultipartError},
    http::StatusCode,
    response::Html,
};
use chrono::NaiveDate;
use ocr_server::domain::SUPPORTED_LANGUAGES;
use std::sync::Arc;

// Fields collected from the upload form.
#[derive(Default)]
struct UploadForm {
    files: Vec<UploadedFile>,
    language: Option<String>,
    optimize: bool,
    use_cache: bool,
}

// Upload form with statistics and the (optionally date-filtered) history.
#[tracing::instrument(name = "index", skip_all, fields(date = ?query.date))]
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Html<String>, PageError> {
    let date_filter = parse_date_filter(query.date.as_deref())?;

    let languages = match state.recognizer.languages().await {
        Ok(languages) if !languages.is_empty() => languages,
        Ok(_) => builtin_languages(),
        Err(err) => {
            tracing::warn!(error = %err, "ocr service languages unavailable, using built-in list");
            builtin_languages()
        }
    };

    let stats = state.stats.snapshot().await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "failed to read stats");
        Default::default()
    });

    let history = state
        .history_use_case()
        .list(date_filter)
        .await
        .map_err(map_front_error)?;

    Ok(Html(views::index_page(&IndexView {
        languages: &languages,
        default_language: &state.default_language,
        stats: &stats,
        history: &history,
        date_filter,
        max_batch_bytes: state.limits.max_batch_bytes,
    })))
}

// Handler running a batch upload through the recognition pipeline.
#[tracing::instrument(name = "recognize", skip_all)]
pub async fn recognize(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Html<String>, PageError> {
    let form = read_upload_form(&mut multipart).await?;
    if form.files.is_empty() {
        return Err(page_error(
            StatusCode::BAD_REQUEST,
            "please choose at least one file",
        ));
    }

    let language = form
        .language
        .map(|language| language.trim().to_string())
        .filter(|language| !language.is_empty())
        .unwrap_or_else(|| state.default_language.clone());
    let settings = BatchSettings {
        language,
        optimize: form.optimize,
        use_cache: form.use_cache,
    };

    tracing::debug!(
        files = form.files.len(),
        language = %settings.language,
        optimize = settings.optimize,
        use_cache = settings.use_cache,
        "batch received"
    );

    let items = state
        .batch_use_case()
        .execute(form.files, &settings)
        .await
        .map_err(map_front_error)?;

    let recognized = items
        .iter()
        .filter(|item| matches!(item.outcome, BatchOutcome::Recognized { .. }))
        .count();
    tracing::info!(
        files = items.len(),
        recognized,
        failed = items.len() - recognized,
        "batch processed."
    );

    Ok(Html(views::results_page(&items)))
}

async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, PageError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "images" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(map_multipart_error)?;
                // Browsers send an empty, unnamed part when no file was picked.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.files.push(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            "language" => {
                form.language = Some(field.text().await.map_err(map_multipart_error)?);
            }
            "optimize" => {
                form.optimize = is_checked(&field.text().await.map_err(map_multipart_error)?);
            }
            "use_cache" => {
                form.use_cache = is_checked(&field.text().await.map_err(map_multipart_error)?);
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

// Unchecked boxes are simply absent from the form.
fn is_checked(value: &str) -> bool {
    !matches!(value.trim(), "" | "off" | "false" | "0")
}

fn parse_date_filter(raw: Option<&str>) -> Result<Option<NaiveDate>, PageError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| page_error(StatusCode::BAD_REQUEST, &format!("invalid date: {raw}")))
}

fn builtin_languages() -> Vec<(String, String)> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|language| (language.code.to_string(), language.name.to_string()))
        .collect()
}

fn map_multipart_error(err: MultipartError) -> PageError {
    tracing::warn!(error = %err, "malformed multipart body");
    page_error(err.status(), &err.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_date_is_blank_then_no_filter_applies() {
        assert_eq!(parse_date_filter(None).unwrap(), None);
        assert_eq!(parse_date_filter(Some("  ")).unwrap(), None);
    }

    #[test]
    fn when_date_is_malformed_then_returns_400() {
        let (status, _) = parse_date_filter(Some("05/01/2024")).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn checkbox_values_are_read_as_flags() {
        assert!(is_checked("on"));
        assert!(is_checked("true"));
        assert!(!is_checked("off"));
        assert!(!is_checked(""));
    }
}
