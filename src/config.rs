use serde::Deserialize;
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::str::FromStr;

use crate::services::schema::ProfilerConfig;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub data_dir: String,
    pub max_file_size: usize,
    pub sample_size: usize,
    pub sample_seed: u64,
    pub numeric_threshold: f64,
    pub date_threshold: f64,
    pub categorical_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        let profiler = ProfilerConfig::default();
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            data_dir: "mock_data".to_string(),
            max_file_size: default_max_file_size(),
            sample_size: profiler.sample_size,
            sample_seed: profiler.seed,
            numeric_threshold: profiler.numeric_threshold,
            date_threshold: profiler.date_threshold,
            categorical_ratio: profiler.categorical_ratio,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let defaults = Config::default();
        Ok(Config {
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr)?,
            data_dir: env_or("SAP_DATA_DIR", defaults.data_dir)?,
            max_file_size: env_or("MAX_FILE_SIZE", defaults.max_file_size)?,
            sample_size: env_or("SAP_SAMPLE_SIZE", defaults.sample_size)?,
            sample_seed: env_or("SAP_SAMPLE_SEED", defaults.sample_seed)?,
            numeric_threshold: env_or("SAP_NUMERIC_THRESHOLD", defaults.numeric_threshold)?,
            date_threshold: env_or("SAP_DATE_THRESHOLD", defaults.date_threshold)?,
            categorical_ratio: env_or("SAP_CATEGORICAL_RATIO", defaults.categorical_ratio)?,
        })
    }

    pub fn profiler_config(&self) -> ProfilerConfig {
        ProfilerConfig {
            sample_size: self.sample_size,
            seed: self.sample_seed,
            numeric_threshold: self.numeric_threshold,
            date_threshold: self.date_threshold,
            categorical_ratio: self.categorical_ratio,
            ..ProfilerConfig::default()
        }
    }
}

pub fn load_config() -> Result<Config> {
    let config = Config::new()?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Failed to parse {} from {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}
