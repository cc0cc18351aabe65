use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tracing::{error, info, Level};

mod routes;
mod models;
mod utils;
mod client;
mod state;

use tseries::spawn_poller;

use crate::client::AnySource;
use crate::state::app_state::AppState;
use crate::utils::conf_helper::{bind, config_path, load_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let debug = std::env::args().any(|a| a == "--debug")
        || std::env::var_os("DASHBOARD_DEBUG").is_some();

    tracing_subscriber::fmt()
        .with_max_level(if debug { Level::DEBUG } else { Level::INFO })
        .init();

    // === CONFIG + LISTENER ===
    let path = config_path();
    let mut config = load_config(&path)
        .await
        .with_context(|| format!("CRITICAL INIT FAILURE: {}", path.display()))?;

    let listener = bind(&mut config).await.context("bind failed")?;

    info!(
        "Server initialized on {}:{}",
        config.connection.ip,
        config.connection.port
    );

    let source = AnySource::from_config(&config.source).context("source setup failed")?;
    let period = Duration::from_millis(config.source.poll_interval_ms);
    let state = AppState::new(config, source)?;

    // the only task that ingests; views never re-arm it
    let poller = spawn_poller(state.source.clone(), state.session.clone(), period);

    let app = Router::new()
        .merge(routes::info_routes::health_routes(state.clone()))
        .merge(routes::data_routes::data_routes(state.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.stop().await;
    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("ctrl-c handler failed: {}", e);
    }
}
