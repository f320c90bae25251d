use crate::domain::{OcrError, OcrProvider, OcrRequest};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

// Longest slice of an unparseable upstream body kept in error messages.
const BODY_EXCERPT_CHARS: usize = 300;

// The clients defined here are for reqwest clients to communicate with external services.
// Thin wrapper around reqwest for OCR.space calls.
#[derive(Clone)]
pub struct OcrSpaceClient {
    http: Client,
    endpoint: String,
    api_key: String,
    engine: u8,
}

// Top-level OCR.space response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct OcrSpaceResponse {
    #[serde(default)]
    parsed_results: Option<Vec<ParsedResult>>,
    #[serde(rename = "OCRExitCode", default)]
    ocr_exit_code: Option<i64>,
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    error_message: Option<ErrorMessage>,
    #[serde(default)]
    error_details: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

// OCR.space sends either a single string or a list of strings here.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn joined(&self) -> String {
        match self {
            ErrorMessage::One(message) => message.trim().to_string(),
            ErrorMessage::Many(messages) => messages
                .iter()
                .map(|message| message.trim())
                .filter(|message| !message.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl OcrSpaceClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        engine: u8,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            engine,
        })
    }

    fn build_form(&self, request: OcrRequest) -> Result<Form, OcrError> {
        let kind = request.image.kind();
        let file_name = request.image.upload_name();

        // The image travels as a file upload field, not as base64 text.
        let file = Part::bytes(request.image.bytes)
            .file_name(file_name)
            .mime_str(kind.mime())
            .map_err(|err| OcrError::Transport(err.to_string()))?;

        Ok(Form::new()
            .part("file", file)
            .text("language", request.language.ocr_space_code)
            .text("filetype", kind.filetype())
            .text("OCREngine", self.engine.to_string())
            .text("detectOrientation", "true")
            .text("scale", "true")
            .text("isOverlayRequired", "false")
            .text("isTable", "false"))
    }
}

#[async_trait]
impl OcrProvider for OcrSpaceClient {
    async fn recognize(&self, request: OcrRequest) -> Result<String, OcrError> {
        let form = self.build_form(request)?;

        let res = self
            .http
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|err| OcrError::Transport(err.to_string()))?;
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| OcrError::Transport(err.to_string()))?;

        // Keep the upstream status and body so the user sees what OCR.space said.
        if !status.is_success() {
            tracing::error!(%status, body = %excerpt(&body), "ocr.space returned an error status");
            let message = Some(excerpt(&body)).filter(|message| !message.is_empty());
            return Err(OcrError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let payload: OcrSpaceResponse = serde_json::from_str(&body).map_err(|err| {
            tracing::error!(error = %err, body = %excerpt(&body), "ocr.space body is not valid json");
            let body = excerpt(&body);
            if body.is_empty() {
                OcrError::Decode(err.to_string())
            } else {
                OcrError::Decode(body)
            }
        })?;

        extract_text(payload)
    }
}

// Turn a decoded OCR.space payload into recognized text or the service's own error.
pub(crate) fn extract_text(payload: OcrSpaceResponse) -> Result<String, OcrError> {
    if payload.is_errored_on_processing {
        let message = payload
            .error_message
            .as_ref()
            .map(ErrorMessage::joined)
            .filter(|message| !message.is_empty())
            .or_else(|| {
                payload
                    .error_details
                    .as_deref()
                    .map(str::trim)
                    .filter(|details| !details.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| match payload.ocr_exit_code {
                Some(code) => format!("ocr processing failed with exit code {code}"),
                None => "ocr processing failed".to_string(),
            });
        return Err(OcrError::Service(message));
    }

    let results = payload.parsed_results.unwrap_or_default();
    if results.is_empty() {
        return Err(OcrError::Service("no parsed results returned".to_string()));
    }

    // Multi-page PDFs come back as one parsed result per page.
    let text = results
        .iter()
        .filter_map(|result| result.parsed_text.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        let page_error = results
            .iter()
            .filter_map(|result| result.error_message.as_deref())
            .map(str::trim)
            .find(|message| !message.is_empty());
        if let Some(message) = page_error {
            return Err(OcrError::Service(message.to_string()));
        }
    }

    Ok(text)
}

fn excerpt(body: &str) -> String {
    body.trim().chars().take(BODY_EXCERPT_CHARS).collect()
}
