// Process-wide logging shared by both services.

use tracing_subscriber::EnvFilter;

// `RUST_LOG` wins over `default_directives`; `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing(default_directives: &str) {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_format().as_deref() {
        Some("json") => subscriber.json().with_current_span(true).try_init(),
        _ => subscriber.compact().try_init(),
    };
    if let Err(err) = installed {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn log_format() -> Option<String> {
    std::env::var("LOG_FORMAT")
        .ok()
        .map(|value| value.trim().to_ascii_lowercase())
}
