// Shared bootstrapping for integration tests: a fake OCR.space upstream and the gateway in front of it.
use axum::{
    Router,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    routing::post,
};
use ocr_server::Settings;
use ocr_server::domain::find_language;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

pub const TEST_API_KEY: &str = "test-key";

// What the fake upstream saw for one request.
#[derive(Debug, Default, Clone)]
pub struct SeenUpload {
    pub api_key: Option<String>,
    pub file_name: Option<String>,
    pub file_len: usize,
    pub fields: HashMap<String, String>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<SeenUpload>>>,
}

// Fake OCR.space endpoint answering every request with one canned response.
pub struct MockOcrSpace {
    pub url: String,
    seen: Arc<Mutex<Vec<SeenUpload>>>,
}

impl MockOcrSpace {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body: body.into(),
            seen: Arc::clone(&seen),
        };
        let app = Router::new()
            .route("/parse/image", post(parse_image))
            .with_state(state);

        // Bind to an ephemeral port to avoid collisions with local services.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral mock port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock upstream failed");
        });

        Self {
            url: format!("http://{addr}/parse/image"),
            seen,
        }
    }

    pub fn seen(&self) -> Vec<SeenUpload> {
        self.seen.lock().expect("seen mutex poisoned").clone()
    }
}

async fn parse_image(
    State(state): State<MockState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut seen = SeenUpload {
        api_key: headers
            .get("apikey")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        ..SeenUpload::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            seen.file_name = field.file_name().map(str::to_string);
            seen.file_len = field.bytes().await.map(|bytes| bytes.len()).unwrap_or(0);
        } else {
            let value = field.text().await.unwrap_or_default();
            seen.fields.insert(name, value);
        }
    }

    state.seen.lock().expect("seen mutex poisoned").push(seen);
    (state.status, state.body.clone())
}

// Start the gateway against the given upstream and return its base URL.
pub async fn start_gateway(upstream_url: &str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    let settings = Settings {
        ocr_space_url: upstream_url.to_string(),
        ocr_space_api_key: TEST_API_KEY.to_string(),
        ocr_engine: 2,
        request_timeout: Duration::from_secs(5),
        default_language: find_language("de").expect("german is supported"),
        max_image_bytes: 1024 * 1024,
        cors_allowed_origins: Vec::new(),
    };

    // The listener is already bound, so connections queue until the server accepts them.
    tokio::spawn(async move {
        ocr_server::run(listener, settings).await.expect("server failed");
    });

    format!("http://{addr}")
}
