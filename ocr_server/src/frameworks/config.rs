use crate::domain::{DEFAULT_LANGUAGE_CODE, Language, find_language};
use std::{env, io, time::Duration};

// Runtime/server settings read from the environment (and `.env`).

pub const DEFAULT_OCR_SPACE_URL: &str = "https://api.ocr.space/parse/image";
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
// OCR.space engine 2 handles non-latin scripts and rotated text better.
pub const DEFAULT_OCR_ENGINE: u8 = 2;

pub fn http_port() -> u16 {
    env::var("OCR_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000)
}

pub fn ocr_space_api_key() -> Option<String> {
    env::var("OCR_SPACE_API_KEY")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn ocr_space_url() -> String {
    env::var("OCR_SPACE_URL").unwrap_or_else(|_| DEFAULT_OCR_SPACE_URL.to_string())
}

pub fn ocr_space_engine() -> u8 {
    env::var("OCR_SPACE_ENGINE")
        .ok()
        .and_then(|value| value.parse::<u8>().ok())
        .filter(|engine| (1..=3).contains(engine))
        .unwrap_or(DEFAULT_OCR_ENGINE)
}

pub fn default_language_code() -> String {
    env::var("OCR_DEFAULT_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE_CODE.to_string())
}

pub fn request_timeout() -> Duration {
    let millis = env::var("OCR_REQUEST_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(30_000);
    Duration::from_millis(millis)
}

pub fn max_image_bytes() -> usize {
    env::var("OCR_MAX_IMAGE_BYTES")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
}

pub fn cors_allowed_origins() -> Vec<String> {
    env::var("CORS_ALLOWED_ORIGINS")
        .map(|raw| parse_origins(&raw))
        .unwrap_or_default()
}

// Comma-separated list; blanks are dropped and "*" means any origin.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|origin| origin == "*") {
        return Vec::new();
    }
    origins
}

// Everything the gateway needs to boot, resolved once at startup.
// Not `Debug`: it carries the API key.
#[derive(Clone)]
pub struct Settings {
    pub ocr_space_url: String,
    pub ocr_space_api_key: String,
    pub ocr_engine: u8,
    pub request_timeout: Duration,
    pub default_language: &'static Language,
    pub max_image_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> io::Result<Self> {
        let api_key = ocr_space_api_key()
            .ok_or_else(|| io::Error::other("OCR_SPACE_API_KEY must be set"))?;

        let language_code = default_language_code();
        let default_language = find_language(&language_code).ok_or_else(|| {
            io::Error::other(format!(
                "OCR_DEFAULT_LANGUAGE {language_code:?} is not a supported language"
            ))
        })?;

        Ok(Self {
            ocr_space_url: ocr_space_url(),
            ocr_space_api_key: api_key,
            ocr_engine: ocr_space_engine(),
            request_timeout: request_timeout(),
            default_language,
            max_image_bytes: max_image_bytes(),
            cors_allowed_origins: cors_allowed_origins(),
        })
    }
}
