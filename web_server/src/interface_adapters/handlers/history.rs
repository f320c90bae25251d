use crate::domain::Stats;
use crate::interface_adapters::handlers::{PageError, map_front_error};
use crate::interface_adapters::protocol::{CompareQuery, ErrorResponse};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views;
use crate::use_cases::{history_to_csv, txt_file_name};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use ocr_server::domain::ImageKind;
use std::sync::Arc;

// Stored upload of a history entry, served with its sniffed content type.
#[tracing::instrument(name = "history_image", skip_all, fields(id = %id))]
pub async fn image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    let (_, bytes) = state
        .history_use_case()
        .image(&id)
        .await
        .map_err(map_front_error)?;

    let content_type = ImageKind::sniff(&bytes).mime();
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

#[tracing::instrument(name = "history_export_txt", skip_all, fields(id = %id))]
pub async fn export_txt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    let entry = state
        .history_use_case()
        .get(&id)
        .await
        .map_err(map_front_error)?;

    let disposition = attachment(&txt_file_name(&entry));
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        entry.text,
    )
        .into_response())
}

#[tracing::instrument(name = "history_export_csv", skip_all)]
pub async fn export_csv(State(state): State<Arc<AppState>>) -> Result<Response, PageError> {
    let entries = state
        .history_use_case()
        .list(None)
        .await
        .map_err(map_front_error)?;
    let csv = history_to_csv(&entries).map_err(map_front_error)?;

    tracing::info!(rows = entries.len(), "history exported.");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment("history.csv")),
        ],
        csv,
    )
        .into_response())
}

#[tracing::instrument(name = "history_delete", skip_all, fields(id = %id))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    state
        .history_use_case()
        .delete(&id)
        .await
        .map_err(map_front_error)?;
    Ok(Redirect::to("/"))
}

#[tracing::instrument(name = "history_clear", skip_all)]
pub async fn clear(State(state): State<Arc<AppState>>) -> Result<Redirect, PageError> {
    state
        .history_use_case()
        .clear()
        .await
        .map_err(map_front_error)?;
    Ok(Redirect::to("/"))
}

#[tracing::instrument(name = "compare", skip_all, fields(left = %query.left, right = %query.right))]
pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareQuery>,
) -> Result<Html<String>, PageError> {
    let (left, right, comparison) = state
        .history_use_case()
        .compare(&query.left, &query.right)
        .await
        .map_err(map_front_error)?;
    Ok(Html(views::comparison_page(&left, &right, &comparison)))
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Stats>, (StatusCode, Json<ErrorResponse>)> {
    state.stats.snapshot().await.map(Json).map_err(|err| {
        tracing::error!(error = %err, "failed to read stats.");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("storage error: {err}"),
            }),
        )
    })
}

pub async fn health() -> &'static str {
    "ok"
}

fn attachment(file_name: &str) -> String {
    format!("attachment; filename=\"{file_name}\"")
}
