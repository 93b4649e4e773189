//! Application configuration
//!
//! Split into focused sub-modules:
//! - `integrations`: weather API key, endpoint, timeout, units
//! - `database`: SQLite database settings
//! - `pipeline`: city list and CSV output path
//! - `logging`: console log filter and format
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml` in the working directory, then `WEATHER_ETL__*` environment
//! variables (`__` separates nested keys, e.g. `WEATHER_ETL__WEATHER__API_KEY`).

mod database;
mod integrations;
mod logging;
mod pipeline;

use domain::{CityName, DomainError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use database::DatabaseConfig;
pub use integrations::WeatherAppConfig;
pub use logging::LoggingConfig;
pub use pipeline::{OutputConfig, PipelineConfig};

/// Prefix for environment overrides
const ENV_PREFIX: &str = "WEATHER_ETL";

/// Configuration errors; all are fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// No weather API key was provided
    #[error("Weather API key is missing; set weather.api_key or WEATHER_ETL__WEATHER__API_KEY")]
    MissingApiKey,

    /// The city list is empty
    #[error("No cities configured; set pipeline.cities")]
    NoCities,

    /// A configured city name is unusable
    #[error("Invalid city in pipeline.cities: {0}")]
    InvalidCity(#[from] DomainError),

    /// A value is out of its accepted range
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// CSV output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Batch configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::environment());

        Self::from_builder(builder)
    }

    /// Environment source
    ///
    /// Values stay strings until deserialization so keys and paths are never
    /// coerced into numbers; the city list is split by `PipelineConfig`.
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).separator("__")
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Check everything a run needs before any network or database activity
    ///
    /// # Errors
    ///
    /// Returns the first problem found: missing API key, empty or invalid
    /// city list, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weather.api_key().is_none() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.weather.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "weather.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }
        self.city_names().map(|_| ())
    }

    /// The configured cities as validated names
    ///
    /// # Errors
    ///
    /// Returns `NoCities` for an empty list, `InvalidCity` for a blank entry.
    pub fn city_names(&self) -> Result<Vec<CityName>, ConfigError> {
        if self.pipeline.cities.is_empty() {
            return Err(ConfigError::NoCities);
        }
        self.pipeline
            .cities
            .iter()
            .map(|c| CityName::new(c.as_str()).map_err(ConfigError::from))
            .collect()
    }
}
