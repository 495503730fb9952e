//! Configuration types for card-fair-value

use crate::model::{WindowPolicy, DEFAULT_CACHE_CAPACITY, DEFAULT_WINDOW_SIZE};
use crate::signal::DecisionConfig;
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Dataset location
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Parquet file with `card_id`, `date`, `market_price` columns
    #[serde(default = "default_processed_path")]
    pub processed_path: PathBuf,
}

fn default_processed_path() -> PathBuf {
    PathBuf::from("./data/processed/prices.parquet")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            processed_path: default_processed_path(),
        }
    }
}

/// Fair value estimator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Trailing window length in observations
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Whether the window includes the target date
    #[serde(default)]
    pub window_policy: WindowPolicy,

    /// Maximum cached predictions
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}
fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            window_policy: WindowPolicy::IncludeTarget,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus scrape port; metrics are not exported when unset
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate TOML configuration
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.decision.validate()?;
        if config.model.window_size == 0 {
            anyhow::bail!("model.window_size must be at least 1");
        }
        Ok(config)
    }
}
