use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber
///
/// `RUST_LOG` takes precedence; `fallback_filter` (usually `Config::log_filter`)
/// is used when it is unset. Fails if a subscriber is already installed.
pub fn init_tracing(fallback_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter))
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", fallback_filter, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
