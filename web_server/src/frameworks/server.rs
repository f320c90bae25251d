// Framework bootstrap for the web front-end.

use crate::frameworks::config::{self, Settings};
use crate::interface_adapters::clients::OcrServiceClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::interface_adapters::stores::{FsHistoryStore, FsResultCache, FsStatsStore};
use ocr_server::frameworks::telemetry::init_tracing;
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

pub async fn run(listener: tokio::net::TcpListener, settings: Settings) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(settings).await?;

    // Start the web server with the HTTP routes wired up.
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_tracing("web_server=debug,info");

    let settings = Settings::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
    })?;

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, settings).await
}

async fn build_state(settings: Settings) -> Result<Arc<AppState>> {
    let recognizer = OcrServiceClient::new(settings.ocr_service_url.clone(), settings.request_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize ocr client: {e}")))?;

    let data_dir = &settings.data_dir;
    let cache = FsResultCache::open(data_dir.join("cache"))
        .await
        .map_err(std::io::Error::other)?;
    let history = FsHistoryStore::open(data_dir.join("history"))
        .await
        .map_err(std::io::Error::other)?;
    let stats = FsStatsStore::open(data_dir.join("stats.json"))
        .await
        .map_err(std::io::Error::other)?;

    tracing::debug!(
        ocr_service_url = %settings.ocr_service_url,
        data_dir = %data_dir.display(),
        max_file_bytes = settings.limits.max_file_bytes,
        max_batch_bytes = settings.limits.max_batch_bytes,
        default_language = %settings.default_language,
        "front-end configured"
    );

    Ok(Arc::new(AppState {
        recognizer: Arc::new(recognizer),
        cache: Arc::new(cache),
        history: Arc::new(history),
        stats: Arc::new(stats),
        clock: Arc::new(SystemClock),
        limits: settings.limits,
        default_language: settings.default_language,
    }))
}
