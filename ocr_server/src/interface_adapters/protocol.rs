use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Response payload for a successful recognition.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecognizeResponse {
    pub text: String,
    // Display name of the language used, e.g. "German".
    pub language: String,
    // Short code of the language used, e.g. "de".
    pub detected_language: String,
    // Human-readable duration, e.g. "1.24 seconds".
    pub processing_time: String,
    pub processing_time_ms: u64,
}

// Language code to display name, e.g. {"de": "German"}.
pub type LanguagesResponse = BTreeMap<String, String>;

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
