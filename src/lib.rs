//! Schema analysis for mock SAP financial tables.
//!
//! Profiles CSV exports column by column, tags SAP field semantics, classifies
//! the table type and serves the results over a small axum API.

use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::schema::SchemaAnalyzer;

// Application state
pub struct AppState {
    pub config: config::Config,
    pub analyzer: SchemaAnalyzer,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let analyzer = SchemaAnalyzer::new(config.profiler_config());
        Self { config, analyzer }
    }

    pub fn data_dir(&self) -> &Path {
        Path::new(&self.config.data_dir)
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::routes())
        .merge(routes::schema::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
