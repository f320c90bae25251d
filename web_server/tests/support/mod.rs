// Boots the full chain for integration tests: fake OCR.space, the gateway, and the front-end.
use axum::{Router, extract::State, http::StatusCode, routing::post};
use ocr_server::domain::find_language;
use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use web_server::domain::UploadLimits;

#[derive(Clone)]
struct MockState {
    body: &'static str,
    hits: Arc<AtomicUsize>,
}

// Fake OCR.space endpoint answering every request with one canned body.
pub struct MockOcrSpace {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl MockOcrSpace {
    pub async fn start(body: &'static str) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = MockState {
            body,
            hits: Arc::clone(&hits),
        };
        let app = Router::new()
            .route("/parse/image", post(parse_image))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral mock port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock upstream failed");
        });

        Self {
            url: format!("http://{addr}/parse/image"),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn parse_image(State(state): State<MockState>, _body: axum::body::Bytes) -> (StatusCode, &'static str) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::OK, state.body)
}

async fn bind_ephemeral() -> (tokio::net::TcpListener, String) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    (listener, format!("http://{addr}"))
}

// Start gateway and front-end against the given upstream; returns the front-end base URL.
pub async fn start_front_end(upstream_url: &str, data_dir: &Path) -> String {
    let (gateway_listener, gateway_url) = bind_ephemeral().await;
    let gateway_settings = ocr_server::Settings {
        ocr_space_url: upstream_url.to_string(),
        ocr_space_api_key: "test-key".to_string(),
        ocr_engine: 2,
        request_timeout: Duration::from_secs(5),
        default_language: find_language("de").expect("german is supported"),
        max_image_bytes: 1024 * 1024,
        cors_allowed_origins: Vec::new(),
    };
    tokio::spawn(async move {
        ocr_server::run(gateway_listener, gateway_settings)
            .await
            .expect("gateway failed");
    });

    let (web_listener, web_url) = bind_ephemeral().await;
    let web_settings = web_server::Settings {
        ocr_service_url: gateway_url,
        data_dir: data_dir.to_path_buf(),
        limits: UploadLimits {
            max_file_bytes: 1024 * 1024,
            max_batch_bytes: 1024 * 1024,
        },
        request_timeout: Duration::from_secs(10),
        default_language: "de".to_string(),
    };
    tokio::spawn(async move {
        web_server::run(web_listener, web_settings)
            .await
            .expect("front-end failed");
    });

    web_url
}
