use crate::domain::UploadLimits;
use ocr_server::domain::{DEFAULT_LANGUAGE_CODE, find_language};
use std::{env, io, path::PathBuf, time::Duration};

// Runtime/server settings read from the environment (and `.env`).

pub const DEFAULT_OCR_SERVICE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_MAX_FILE_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_MAX_BATCH_BYTES: usize = 10 * 1024 * 1024;

pub fn http_port() -> u16 {
    env::var("WEB_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8501)
}

pub fn ocr_service_url() -> String {
    env::var("OCR_SERVICE_URL").unwrap_or_else(|_| DEFAULT_OCR_SERVICE_URL.to_string())
}

// Root for cache/, history/ and stats.json.
pub fn data_dir() -> PathBuf {
    env::var("WEB_DATA_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn max_file_bytes() -> usize {
    env::var("WEB_MAX_FILE_BYTES")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_BYTES)
}

pub fn max_batch_bytes() -> usize {
    env::var("WEB_MAX_BATCH_BYTES")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_BATCH_BYTES)
}

// Slightly above the gateway's own upstream timeout.
pub fn request_timeout() -> Duration {
    let millis = env::var("WEB_REQUEST_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(35_000);
    Duration::from_millis(millis)
}

// Language preselected in the form; shares the gateway's variable.
pub fn default_language_code() -> String {
    env::var("OCR_DEFAULT_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE_CODE.to_string())
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub ocr_service_url: String,
    pub data_dir: PathBuf,
    pub limits: UploadLimits,
    pub request_timeout: Duration,
    pub default_language: String,
}

impl Settings {
    pub fn from_env() -> io::Result<Self> {
        let language_code = default_language_code();
        let default_language = find_language(&language_code).ok_or_else(|| {
            io::Error::other(format!(
                "OCR_DEFAULT_LANGUAGE {language_code:?} is not a supported language"
            ))
        })?;

        let limits = UploadLimits {
            max_file_bytes: max_file_bytes(),
            max_batch_bytes: max_batch_bytes(),
        };
        if limits.max_file_bytes == 0 || limits.max_batch_bytes == 0 {
            return Err(io::Error::other("upload limits must be greater than zero"));
        }

        Ok(Self {
            ocr_service_url: ocr_service_url(),
            data_dir: data_dir(),
            limits,
            request_timeout: request_timeout(),
            default_language: default_language.code.to_string(),
        })
    }
}
