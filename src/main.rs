use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

use sap_schema_services::{app, config, logging, services::mock_data, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::load_config()?;
    let addr: SocketAddr = config.bind_addr.parse()?;

    // Build our application state
    let state = Arc::new(AppState::new(config));
    let tables = mock_data::ensure_mock_data(state.data_dir())?;
    tracing::info!("{} mock SAP tables available in {}", tables.len(), state.data_dir().display());

    // Build our application with a route
    let app = app(state);

    // Run it
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
