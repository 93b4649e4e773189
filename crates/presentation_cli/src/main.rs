//! Weather ETL
//!
//! Fetches current conditions for the configured cities, then appends the
//! complete observations to the SQLite `weather` table and the CSV log.
//! One run per invocation; scheduling is left to cron or a systemd timer.

use std::sync::Arc;

use anyhow::Context;
use application::{BatchFetcher, PipelineRunner};
use infrastructure::{
    AppConfig, CsvWeatherLog, SqliteWeatherStore, WeatherAdapter, create_pool, init_logging,
};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e).context("Invalid configuration");
    }

    let runner = build_runner(&config)?;
    info!(cities = runner.cities().len(), "Starting weather ETL run");

    match runner.run().await {
        Ok(outcome) => {
            info!(%outcome, "Weather ETL run complete");
            Ok(())
        },
        Err(e) => {
            error!(error = %e, "Weather ETL run aborted");
            Err(e).context("Weather ETL run aborted")
        },
    }
}

/// Wire adapters and services from a validated configuration
fn build_runner(config: &AppConfig) -> anyhow::Result<PipelineRunner> {
    let cities = config.city_names()?;

    let pool = Arc::new(create_pool(&config.database).context("Failed to open database")?);
    let relational = Arc::new(SqliteWeatherStore::new(pool));
    let file = Arc::new(CsvWeatherLog::new(&config.output.csv_path));

    let client_config = config.weather.to_client_config()?;
    let timeout = client_config.timeout();
    let weather = Arc::new(WeatherAdapter::new(client_config)?);

    Ok(PipelineRunner::new(
        cities,
        BatchFetcher::new(weather, timeout),
        relational,
        file,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.weather.api_key = Some(SecretString::from("test-key".to_string()));
        config.database.path = dir.path().join("weather.db").to_string_lossy().into_owned();
        config.output.csv_path = dir.path().join("weather_data.csv").to_string_lossy().into_owned();
        config
    }

    #[test]
    fn builds_runner_for_default_cities() {
        let dir = tempfile::tempdir().unwrap();
        let runner = build_runner(&config_in(&dir)).unwrap();
        assert_eq!(runner.cities().len(), 7);
        assert_eq!(runner.cities()[0].as_str(), "Seattle");
    }

    #[test]
    fn missing_key_fails_to_build() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        config.weather.api_key = None;
        assert!(build_runner(&config).is_err());
    }

    #[test]
    fn empty_city_list_fails_to_build() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        config.pipeline.cities.clear();
        assert!(build_runner(&config).is_err());
    }
}
