// Framework bootstrap for the OCR gateway.

use crate::frameworks::config::{self, Settings};
use crate::frameworks::telemetry::init_tracing;
use crate::interface_adapters::clients::OcrSpaceClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

pub async fn run(listener: tokio::net::TcpListener, settings: Settings) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(settings)?;

    // Start the web server with the HTTP routes wired up.
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_tracing("ocr_server=debug,info");

    let settings = Settings::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
    })?;
    tracing::info!("OCR.space api key loaded");

    // Listen on all interfaces so the front-end can reach us from another host.
    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, settings).await
}

fn build_state(settings: Settings) -> Result<Arc<AppState>> {
    let client = OcrSpaceClient::new(
        settings.ocr_space_url.clone(),
        settings.ocr_space_api_key,
        settings.request_timeout,
        settings.ocr_engine,
    )
    .map_err(|e| std::io::Error::other(format!("failed to initialize ocr client: {e}")))?;
    tracing::debug!(
        ocr_space_url = %settings.ocr_space_url,
        ocr_engine = settings.ocr_engine,
        timeout_ms = settings.request_timeout.as_millis() as u64,
        default_language = settings.default_language.code,
        "ocr client configured"
    );

    Ok(Arc::new(AppState {
        ocr: Arc::new(client),
        default_language: settings.default_language,
        max_image_bytes: settings.max_image_bytes,
        cors_allowed_origins: settings.cors_allowed_origins,
    }))
}
