//! Append-only CSV log of weather records
//!
//! The header row is written only when the file is missing or empty, so
//! repeated runs keep appending data rows under a single header.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use application::{
    error::ApplicationError,
    ports::{FileSinkPort, LoadStatus},
};
use async_trait::async_trait;
use domain::{FIELD_LABELS, WeatherRecord};
use thiserror::Error;
use tokio::task;
use tracing::{debug, info, instrument};

/// CSV log errors
#[derive(Debug, Error)]
pub enum CsvLogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Blocking task failed: {0}")]
    Task(String),
}

/// CSV file sink
#[derive(Debug, Clone)]
pub struct CsvWeatherLog {
    path: PathBuf,
}

impl CsvWeatherLog {
    /// Create a log writing to `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn needs_header(path: &Path) -> bool {
        !fs::metadata(path).is_ok_and(|meta| meta.len() > 0)
    }

    fn write_rows(path: &Path, records: &[WeatherRecord]) -> Result<usize, CsvLogError> {
        let io_error = |source| CsvLogError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let write_header = Self::needs_header(path);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(FIELD_LABELS)?;
        }
        for record in records {
            writer.write_record(record.to_row())?;
        }
        writer.flush().map_err(io_error)?;

        Ok(records.len())
    }
}

#[async_trait]
impl FileSinkPort for CsvWeatherLog {
    #[instrument(skip(self, records), fields(path = %self.path.display(), records = records.len()))]
    async fn append(&self, records: &[WeatherRecord]) -> Result<LoadStatus, ApplicationError> {
        if records.is_empty() {
            info!("No data to save to CSV");
            return Ok(LoadStatus::NothingToLoad);
        }

        let path = self.path.clone();
        let records = records.to_vec();

        let rows = task::spawn_blocking(move || Self::write_rows(&path, &records))
            .await
            .map_err(|e| CsvLogError::Task(e.to_string()))
            .and_then(|result| result)
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

        debug!(rows, "Appended CSV rows");
        Ok(LoadStatus::Loaded(rows))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domain::Humidity;

    fn record(city: &str) -> WeatherRecord {
        WeatherRecord {
            city: city.to_string(),
            temperature: 55.2,
            feels_like: 53.7,
            humidity: Humidity::new(80).unwrap(),
            condition: "light rain, mist".to_string(),
            wind_speed: 6.1,
            observed_at: Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn first_append_writes_header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvWeatherLog::new(dir.path().join("weather_data.csv"));

        let status = log.append(&[record("Seattle")]).await.unwrap();

        assert_eq!(status, LoadStatus::Loaded(1));
        let lines = lines(log.path());
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "City,Temperature,Feels Like (°F),Humidity (%),Weather Condition,Wind Speed (mph),Timestamp"
        );
        assert_eq!(
            lines[1],
            "Seattle,55.2,53.7,80,\"light rain, mist\",6.1,2026-05-01 12:00:00.000000"
        );
    }

    #[tokio::test]
    async fn header_is_written_once_across_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvWeatherLog::new(dir.path().join("weather_data.csv"));

        log.append(&[record("Seattle")]).await.unwrap();
        log.append(&[record("Miami"), record("Nashville")]).await.unwrap();

        let lines = lines(log.path());
        assert_eq!(lines.len(), 4);
        assert_eq!(lines.iter().filter(|l| l.starts_with("City,")).count(), 1);
        assert!(lines[3].starts_with("Nashville,"));
    }

    #[tokio::test]
    async fn empty_existing_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather_data.csv");
        fs::write(&path, "").unwrap();
        let log = CsvWeatherLog::new(&path);

        log.append(&[record("Seattle")]).await.unwrap();

        assert!(lines(&path)[0].starts_with("City,"));
    }

    #[tokio::test]
    async fn empty_batch_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvWeatherLog::new(dir.path().join("weather_data.csv"));

        let status = log.append(&[]).await.unwrap();

        assert_eq!(status, LoadStatus::NothingToLoad);
        assert!(!log.path().exists());
    }

    #[tokio::test]
    async fn unwritable_path_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let log = CsvWeatherLog::new(dir.path());

        let result = log.append(&[record("Seattle")]).await;

        assert!(matches!(result, Err(ApplicationError::Persistence(_))));
    }

    #[test]
    fn location_reports_path() {
        let log = CsvWeatherLog::new("out/weather_data.csv");
        assert_eq!(log.location(), "out/weather_data.csv");
    }
}
