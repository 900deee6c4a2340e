use std::sync::Arc;

use clap::Parser;
use mimalloc::MiMalloc;
use shortcuts_api::{config::AppConfig, routes::app, state::AppState};
use shortcuts_osrm::client::OsrmClient;
use tracing::{Level, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    let config = AppConfig::parse();

    let level = if config.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let client = OsrmClient::new(config.osrm_params())?;
    let state = Arc::new(AppState::new(client, config.optimizer_params()));

    let listener = tokio::net::TcpListener::bind((config.host, config.port)).await?;
    info!(
        address = %listener.local_addr()?,
        osrm_url = config.osrm_url.as_str(),
        "Listening"
    );

    axum::serve(listener, app(state)).await?;

    Ok(())
}
