use crate::application::pipeline::{DEFAULT_WINDOW_SIZE, PipelineConfig};
use crate::domain::catalog::{CatalogEntry, SeriesCatalog};
use crate::domain::error::CoreError;
use crate::domain::horizon::Horizon;
use crate::domain::series::{DisplayMode, YAxisScale};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/app";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl From<CoreError> for ConfigError {
    fn from(err: CoreError) -> Self {
        ConfigError::Validation(err.to_string())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    pub token: Option<String>,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            retry_count: default_retry_count(),
            token: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default)]
    pub default_mode: DisplayMode,
    #[serde(default)]
    pub default_scale: YAxisScale,
    /// Overrides the built-in catalog when present
    pub series: Option<Vec<SeriesSettings>>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            default_mode: DisplayMode::default(),
            default_scale: YAxisScale::default(),
            series: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesSettings {
    pub horizon: String,
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub dashed: bool,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_retry_count() -> u32 {
    3
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

/// Load `<path>.toml` (optional) overlaid with `ROI__SECTION__KEY` environment variables.
pub fn load_app_config(path: &str) -> Result<AppConfig, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("ROI").separator("__"))
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.pipeline_config()?;
    Ok(app_config)
}

impl AppConfig {
    /// Validated, immutable pipeline settings.
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigError> {
        let catalog = match &self.chart.series {
            Some(series) => build_catalog(series)?,
            None => SeriesCatalog::default(),
        };
        if catalog.is_empty() {
            return Err(ConfigError::Validation("chart.series must not be empty".to_string()));
        }
        Ok(PipelineConfig::new(catalog, self.chart.window_size)?)
    }
}

fn build_catalog(series: &[SeriesSettings]) -> Result<SeriesCatalog, ConfigError> {
    let entries = series
        .iter()
        .map(|s| {
            let horizon: Horizon = s.horizon.parse()?;
            Ok(CatalogEntry::new(horizon, s.label.clone(), s.color.clone(), s.dashed))
        })
        .collect::<Result<Vec<_>, CoreError>>()?;
    Ok(SeriesCatalog::new(entries)?)
}
