//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the OpenWeatherMap
//! adapter, the SQLite weather table, and the CSV log. Also owns
//! configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::WeatherAdapter;
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, LoggingConfig, OutputConfig, PipelineConfig,
    WeatherAppConfig,
};
pub use persistence::{
    ConnectionPool, CsvWeatherLog, DatabaseError, SqliteWeatherStore, create_pool,
};
pub use telemetry::{TelemetryError, init_logging};
