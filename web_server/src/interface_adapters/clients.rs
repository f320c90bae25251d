use crate::domain::{FrontError, RecognizedText, Recognizer};
use async_trait::async_trait;
use ocr_server::interface_adapters::protocol::{
    ErrorResponse, LanguagesResponse, RecognizeResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

// Thin wrapper around reqwest for calls to the OCR gateway.
#[derive(Clone)]
pub struct OcrServiceClient {
    http: Client,
    base_url: String,
}

#[derive(Debug)]
pub enum OcrServiceError {
    Transport(reqwest::Error),
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },
    Decode(reqwest::Error),
}

impl fmt::Display for OcrServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcrServiceError::Transport(err) => write!(f, "ocr service unreachable: {err}"),
            // The gateway's message already explains the failure; show it untouched.
            OcrServiceError::Upstream {
                message: Some(message),
                ..
            } => write!(f, "{message}"),
            OcrServiceError::Upstream {
                status,
                message: None,
            } => write!(f, "ocr service error {status}"),
            OcrServiceError::Decode(err) => write!(f, "ocr service response decode error: {err}"),
        }
    }
}

impl std::error::Error for OcrServiceError {}

impl From<OcrServiceError> for FrontError {
    fn from(err: OcrServiceError) -> Self {
        FrontError::Recognition(err.to_string())
    }
}

impl OcrServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post_recognize(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        language: &str,
    ) -> Result<RecognizeResponse, OcrServiceError> {
        let form = Form::new()
            .part("image", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("language", language.to_string());

        let url = format!("{}/recognize", self.base_url);
        let res = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(OcrServiceError::Transport)?;
        let status = res.status();

        // Keep the gateway's message so the user sees what went wrong upstream.
        if !status.is_success() {
            let message = res
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|payload| payload.error);
            return Err(OcrServiceError::Upstream { status, message });
        }

        res.json::<RecognizeResponse>()
            .await
            .map_err(OcrServiceError::Decode)
    }

    async fn get_languages(&self) -> Result<LanguagesResponse, OcrServiceError> {
        let url = format!("{}/languages", self.base_url);
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(OcrServiceError::Transport)?;
        let status = res.status();
        if !status.is_success() {
            return Err(OcrServiceError::Upstream {
                status,
                message: None,
            });
        }

        res.json::<LanguagesResponse>()
            .await
            .map_err(OcrServiceError::Decode)
    }
}

#[async_trait]
impl Recognizer for OcrServiceClient {
    async fn recognize(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        language: &str,
    ) -> Result<RecognizedText, FrontError> {
        let res = self
            .post_recognize(file_name, bytes, language)
            .await
            .inspect_err(|err| tracing::error!(error = %err, %file_name, "ocr service call failed"))?;

        Ok(RecognizedText {
            text: res.text,
            language_code: res.detected_language,
            language_name: res.language,
            processing_time: res.processing_time,
        })
    }

    async fn languages(&self) -> Result<Vec<(String, String)>, FrontError> {
        let languages = self.get_languages().await?;
        Ok(languages.into_iter().collect())
    }
}
