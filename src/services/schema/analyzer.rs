use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, UNIX_EPOCH};

use moka::sync::Cache;

use super::insights;
use super::loader::{load_csv, sample_rows, LoadedTable};
use super::patterns::{infer_table_type, SapTableType};
use super::profiler::{profile_column, ProfilerConfig};
use super::types::*;
use crate::error::AppError;
use crate::services::mapper;

/// Analyzes CSV files and memoizes results per path and modification time.
///
/// Entries are never evicted; a modified file simply gets a new key.
pub struct SchemaAnalyzer {
    config: ProfilerConfig,
    cache: Cache<String, Arc<SchemaAnalysis>>,
}

impl SchemaAnalyzer {
    pub fn new(config: ProfilerConfig) -> Self {
        Self {
            config,
            cache: Cache::builder().build(),
        }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Analyzes `path` using the configured sample size.
    pub fn analyze_file(&self, path: &Path) -> Result<Arc<SchemaAnalysis>, AppError> {
        self.analyze(path, self.config.sample_size)
    }

    pub fn analyze(&self, path: &Path, sample_size: usize) -> Result<Arc<SchemaAnalysis>, AppError> {
        let metadata = std::fs::metadata(path)?;
        let cache_key = cache_key(path, &metadata)?;

        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::info!("Using cached schema analysis for {}", path.display());
            return Ok(cached);
        }

        let start = Instant::now();
        tracing::info!("Starting schema analysis for {}", path.display());

        let table = load_csv(path)?;
        let analysis = Arc::new(self.analyze_table(&table, metadata.len(), sample_size));

        self.cache.insert(cache_key, Arc::clone(&analysis));

        tracing::info!(
            "Schema analysis completed for {} in {:?}: {} ({} columns, {} of {} rows analyzed)",
            path.display(),
            start.elapsed(),
            analysis.sap_table_type,
            analysis.file_info.total_columns,
            analysis.file_info.analyzed_rows,
            analysis.file_info.total_rows
        );
        Ok(analysis)
    }

    /// Runs the profiling pipeline over an already loaded table.
    pub fn analyze_table(&self, table: &LoadedTable, file_size: u64, sample_size: usize) -> SchemaAnalysis {
        let sample = sample_rows(table.row_count, sample_size, self.config.seed);
        if sample.len() < table.row_count {
            tracing::info!(
                "Analyzing sample of {} rows from {} total rows",
                sample.len(),
                table.row_count
            );
        }

        let mut column_analysis: ColumnAnalysis = table
            .headers
            .iter()
            .zip(&table.columns)
            .map(|(name, column)| (name.clone(), profile_column(name, column, &sample, &self.config)))
            .collect();

        let sap_table_type = if sample.is_empty() {
            SapTableType::Unknown
        } else {
            infer_table_type(table.headers.iter().map(String::as_str))
        };

        let schema_coverage = if sap_table_type == SapTableType::Unknown {
            None
        } else {
            for (name, profile) in column_analysis.iter_mut() {
                profile.description = mapper::column_description(sap_table_type, name).map(str::to_string);
            }
            Some(mapper::schema_coverage(
                sap_table_type,
                table.headers.iter().map(String::as_str),
            ))
        };

        let data_insights = insights::aggregate(&column_analysis, sample.len());

        SchemaAnalysis {
            file_info: FileInfo {
                total_rows: table.row_count,
                total_columns: table.column_count(),
                file_size_mb: round2(file_size as f64 / 1024.0 / 1024.0),
                analyzed_rows: sample.len(),
            },
            sap_table_type,
            query_suggestions: insights::suggest_queries(sap_table_type),
            schema_summary: insights::schema_summary(sap_table_type, column_analysis.len()),
            column_analysis,
            data_insights,
            schema_coverage,
        }
    }
}

impl Default for SchemaAnalyzer {
    fn default() -> Self {
        Self::new(ProfilerConfig::default())
    }
}

fn cache_key(path: &Path, metadata: &std::fs::Metadata) -> Result<String, AppError> {
    let modified = metadata
        .modified()?
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(format!("File modification time before epoch: {}", e)))?;
    Ok(format!("{}_{}", path.display(), modified.as_nanos()))
}
