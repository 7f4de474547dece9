//! AgriBot API server binary.
//!
//! Loads `agribot-config.yaml` (or the file named by `AGRIBOT_CONFIG`),
//! applies environment overrides, initializes tracing, builds the shared
//! state, and serves the HTTP API until `Ctrl-C`.

use std::sync::Arc;

use agribot_server::{AppConfig, AppState, start_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "starting AgriBot server"
    );

    let state = Arc::new(AppState::from_config(&config).await?);
    start_server(&config.server, state).await?;

    Ok(())
}
