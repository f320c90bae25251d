use serde::{Deserialize, Serialize};

// Query string for the index page history filter.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    // `YYYY-MM-DD`; empty means no filter.
    pub date: Option<String>,
}

// Query string selecting two history entries to compare.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub left: String,
    pub right: String,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
