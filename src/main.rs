//! MedAppt API Server
//!
//! Run with: cargo run --bin medappt
//!
//! Configuration is read from the first `config.toml` found in the user
//! config directory, `/etc/medappt` or the working directory, then
//! overridden by `MEDAPPT_*` environment variables.

use anyhow::Context;
use medappt::api::{serve, AppState};
use medappt::config::Config;
use medappt::datastore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Starting MedAppt API server v{}", env!("CARGO_PKG_VERSION"));

    config.validate().context("invalid configuration")?;

    let store = datastore::connect(&config.data_service)
        .context("failed to set up the data service client")?;
    tracing::info!(
        backend = store.backend(),
        url = %config.data_service.url,
        "Data service configured"
    );

    // Serve anyway; readiness reports the outage
    if let Err(e) = store.ping().await {
        tracing::warn!(error = %e, "Data service is not reachable yet");
    }

    let state = AppState::new(store, config.api.clone());
    serve(state).await.context("API server failed")?;

    Ok(())
}
