//! SQLite weather table
//!
//! Implements the `RelationalSinkPort`: an append-only `weather` table whose
//! creation is idempotent.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{LoadStatus, RelationalSinkPort},
};
use async_trait::async_trait;
use domain::WeatherRecord;
use rusqlite::params;
use tokio::task;
use tracing::{debug, info, instrument};

use super::connection::{ConnectionPool, DatabaseError};

/// Name of the backing table
pub const WEATHER_TABLE: &str = "weather";

/// Data columns, in record field order (the surrogate `id` is implicit)
pub const WEATHER_COLUMNS: [&str; 7] = [
    "City",
    "Temperature",
    "Feels_Like_F",
    "Humidity",
    "Weather_Condition",
    "Wind_Speed_mph",
    "Timestamp",
];

const CREATE_WEATHER_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS weather (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        City TEXT,
        Temperature REAL,
        Feels_Like_F REAL,
        Humidity INTEGER,
        Weather_Condition TEXT,
        Wind_Speed_mph REAL,
        Timestamp DATETIME
    );
";

/// SQLite-based weather table
#[derive(Debug, Clone)]
pub struct SqliteWeatherStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteWeatherStore {
    /// Create a new store over an existing pool
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Build the insert statement for the given columns
    ///
    /// Every column must be one of [`WEATHER_COLUMNS`], with no repeats, so
    /// that nothing outside the known schema is ever interpolated into SQL.
    fn insert_statement(columns: &[String]) -> Result<String, DatabaseError> {
        if columns.len() != WEATHER_COLUMNS.len() {
            return Err(DatabaseError::UnknownColumn {
                table: WEATHER_TABLE.to_string(),
                column: format!("expected {} columns, got {}", WEATHER_COLUMNS.len(), columns.len()),
            });
        }
        for (i, column) in columns.iter().enumerate() {
            let known = WEATHER_COLUMNS.contains(&column.as_str());
            let repeated = columns[..i].contains(column);
            if !known || repeated {
                return Err(DatabaseError::UnknownColumn {
                    table: WEATHER_TABLE.to_string(),
                    column: column.clone(),
                });
            }
        }

        let quoted: Vec<String> = columns.iter().map(|c| format!("\"{c}\"")).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        Ok(format!(
            "INSERT INTO {WEATHER_TABLE} ({}) VALUES ({})",
            quoted.join(", "),
            placeholders.join(", ")
        ))
    }

    fn insert_all(
        pool: &ConnectionPool,
        sql: &str,
        records: &[WeatherRecord],
    ) -> Result<usize, DatabaseError> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(sql)?;
            for record in records {
                stmt.execute(params![
                    record.city,
                    record.temperature,
                    record.feels_like,
                    i64::from(record.humidity),
                    record.condition,
                    record.wind_speed,
                    record.formatted_timestamp(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }
}

fn persistence_error(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Persistence(e.to_string())
}

#[async_trait]
impl RelationalSinkPort for SqliteWeatherStore {
    #[instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || -> Result<(), ApplicationError> {
            let conn = pool.get().map_err(persistence_error)?;
            conn.execute_batch(CREATE_WEATHER_TABLE)
                .map_err(persistence_error)?;
            info!(table = WEATHER_TABLE, "Table checked/created successfully");
            Ok(())
        })
        .await
        .map_err(|e| persistence_error(DatabaseError::Task(e.to_string())))?
    }

    #[instrument(skip(self, columns, records), fields(records = records.len()))]
    async fn append(
        &self,
        columns: &[String],
        records: &[WeatherRecord],
    ) -> Result<LoadStatus, ApplicationError> {
        if records.is_empty() {
            info!("No data to load into database");
            return Ok(LoadStatus::NothingToLoad);
        }

        let sql = Self::insert_statement(columns).map_err(persistence_error)?;
        let pool = Arc::clone(&self.pool);
        let records = records.to_vec();

        let rows = task::spawn_blocking(move || Self::insert_all(&pool, &sql, &records))
            .await
            .map_err(|e| persistence_error(DatabaseError::Task(e.to_string())))?
            .map_err(persistence_error)?;

        debug!(rows, "Appended weather rows");
        Ok(LoadStatus::Loaded(rows))
    }
}
