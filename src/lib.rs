pub mod config;
pub mod identity;
pub mod models;
pub mod db;
pub mod lifecycle;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for embedding applications. The presentation
/// layer calls this once at startup; RUST_LOG overrides the default
/// filter.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
