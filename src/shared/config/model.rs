use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub constraints: ConstraintConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the published fact table and the run lock
    pub dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: "data/facts".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "data/logs".to_string(),
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Zone that offset-qualified timestamps are converted into (None = UTC)
    pub timezone: Option<String>,
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            timezone: None,
            default_currency: default_currency(),
        }
    }
}

/// Column bounds declared by the destination table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConstraintConfig {
    #[serde(default = "default_max_user_id_len")]
    pub max_user_id_len: usize,
    #[serde(default = "default_max_country_len")]
    pub max_country_len: usize,
}

fn default_max_user_id_len() -> usize {
    7
}

fn default_max_country_len() -> usize {
    2
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            max_user_id_len: default_max_user_id_len(),
            max_country_len: default_max_country_len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationConfig {
    /// Absolute tolerance for floating-point comparisons
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Offending rows kept per failed check (the total is always reported)
    #[serde(default = "default_max_reported_rows")]
    pub max_reported_rows: usize,
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_reported_rows() -> usize {
    20
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_reported_rows: default_max_reported_rows(),
        }
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("SPIN_FACTS_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
