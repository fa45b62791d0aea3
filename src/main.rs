use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coursereg::config::AppConfig;
use coursereg::credits::{CreditProcessor, CreditsConfig};
use coursereg::db::SelectionDbManager;
use coursereg::server;
use coursereg::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional config file path as the first argument.
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_file(Path::new(&path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {path}: {e}"))?,
        None => AppConfig::default(),
    };

    let credits_config = match &config.credits_config {
        Some(path) => match CreditsConfig::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(
                    "Failed to load credits config {}: {e}; using defaults",
                    path.display()
                );
                CreditsConfig::default()
            }
        },
        None => CreditsConfig::default(),
    };

    let db = SelectionDbManager::new(&config.db_path);
    let state = Arc::new(AppState::new(db, CreditProcessor::new(credits_config)));

    let router = server::create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install ctrl-c handler: {e}");
        return;
    }
    info!("Shutdown signal received");
}
