//! Snow-depth API server binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Build the Frost client with the configured client id
//! 4. Serve HTTP until `Ctrl-C`

use std::sync::Arc;

use anyhow::Context;
use snowdepth_frost::FrostClient;
use snowdepth_server::{AppConfig, AppState, start_server};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the HTTP client cannot
/// be built, or the server fails to bind.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("snowdepth-server starting");

    let config = AppConfig::from_env().context("loading configuration")?;
    info!(
        host = config.server.host,
        port = config.server.port,
        station = config.snow.station,
        element = config.snow.element,
        index_path = %config.index_path.display(),
        "Configuration loaded"
    );

    if config.frost.client_id.is_none() {
        warn!("CLIENT_ID not set; /snow will fail until it is configured");
    }

    let frost = FrostClient::new(config.frost.clone()).context("building Frost client")?;
    info!(base_url = %frost.base_url(), "Frost client ready");
    let state = Arc::new(AppState::new(
        frost,
        config.snow.clone(),
        config.index_path.clone(),
    ));

    start_server(&config.server, state).await?;

    Ok(())
}
