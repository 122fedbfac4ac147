use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
    Json,
    http::Method,
};
use std::path::PathBuf;
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::{AnalyzeRequest, ColumnDescriptionResponse},
    services::{
        mapper,
        mock_data,
        schema::{SapTableType, SchemaAnalysis},
    },
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/schema/analyze", post(analyze_file))
        .route("/schema/tables/:table", get(analyze_mock_table))
        .route("/schema/tables/:table/columns/:column", get(describe_column))
        .layer(cors)
}

async fn analyze_file(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<SchemaAnalysis>, AppError> {
    if request.file_path.trim().is_empty() {
        return Err(AppError::InvalidInput("file_path is required".to_string()));
    }
    let sample_size = request
        .sample_size
        .unwrap_or(state.analyzer.config().sample_size);
    if sample_size == 0 {
        return Err(AppError::InvalidInput("sample_size must be positive".to_string()));
    }

    let path = PathBuf::from(&request.file_path);
    let size = tokio::fs::metadata(&path).await?.len();
    if size > state.config.max_file_size as u64 {
        tracing::warn!("Rejected {} ({} bytes) as too large", path.display(), size);
        return Err(AppError::InvalidInput(format!(
            "File is {} bytes, the limit is {} bytes",
            size, state.config.max_file_size
        )));
    }

    tracing::info!("Analyzing {} with sample size {}", path.display(), sample_size);
    let analysis = run_analysis(state, path, sample_size).await?;
    Ok(Json(analysis))
}

async fn analyze_mock_table(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
) -> Result<Json<SchemaAnalysis>, AppError> {
    let table = parse_table(&table)?;
    let path = mock_data::table_path(state.data_dir(), table);
    let sample_size = state.analyzer.config().sample_size;

    let analysis = run_analysis(state, path, sample_size).await?;
    Ok(Json(analysis))
}

async fn describe_column(
    Path((table, column)): Path<(String, String)>,
) -> Result<Json<ColumnDescriptionResponse>, AppError> {
    let table = parse_table(&table)?;
    let description = mapper::column_description(table, &column)
        .ok_or_else(|| AppError::NotFound(format!("No description for {}.{}", table, column)))?;

    Ok(Json(ColumnDescriptionResponse {
        table: table.to_string(),
        table_description: mapper::table_description(table).to_string(),
        column: column.to_uppercase(),
        description: description.to_string(),
    }))
}

fn parse_table(name: &str) -> Result<SapTableType, AppError> {
    SapTableType::from_name(name)
        .ok_or_else(|| AppError::InvalidInput(format!("Unsupported SAP table: {}", name)))
}

async fn run_analysis(
    state: Arc<AppState>,
    path: PathBuf,
    sample_size: usize,
) -> Result<SchemaAnalysis, AppError> {
    let start = std::time::Instant::now();
    let analysis = tokio::task::spawn_blocking(move || state.analyzer.analyze(&path, sample_size)).await??;
    tracing::debug!("Analysis request served in {:?}", start.elapsed());
    Ok(analysis.as_ref().clone())
}
