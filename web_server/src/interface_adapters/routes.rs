use crate::interface_adapters::handlers::{
    clear, compare, delete, export_csv, export_txt, health, image, index, recognize, stats,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;

// Room for multipart boundaries and the option fields on top of the files.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state
        .limits
        .max_batch_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/", get(index))
        .route("/recognize", post(recognize))
        .route("/history/clear", post(clear))
        .route("/history/export.csv", get(export_csv))
        .route("/history/{id}/image", get(image))
        .route("/history/{id}/export.txt", get(export_txt))
        .route("/history/{id}/delete", post(delete))
        .route("/compare", get(compare))
        .route("/stats", get(stats))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
