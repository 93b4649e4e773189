//! Pipeline runner
//!
//! The single entry point a scheduler invokes: bootstrap the schema, fetch
//! the batch, transform it, and persist to both sinks independently.

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use domain::{CityName, FIELD_LABELS, WeatherRecord};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use super::batch_fetcher::BatchFetcher;
use super::record_transformer::RecordTransformer;
use super::schema_normalizer::normalize_field_names;
use crate::error::ApplicationError;
use crate::ports::{FileSinkPort, LoadStatus, RelationalSinkPort};

/// What happened to the batch at one sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum SinkStatus {
    /// No write was attempted
    Skipped,
    /// This many rows were written
    Loaded(usize),
    /// The write failed with this message
    Failed(String),
}

impl SinkStatus {
    /// Whether the sink stored the batch
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl fmt::Display for SinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Loaded(rows) => write!(f, "{rows} rows"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Cities in the batch
    pub requested: usize,
    /// Cities whose fetch returned a payload
    pub succeeded: usize,
    /// Cities whose fetch failed
    pub failed: usize,
    /// Complete records produced by the transform
    pub records: usize,
    /// Relational sink result
    pub relational: SinkStatus,
    /// File sink result
    pub file: SinkStatus,
    /// Whether at least one sink stored the batch
    pub persisted: bool,
}

impl fmt::Display for PipelineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requested, {} succeeded, {} failed, {} records; database: {}, file: {}; persisted={}",
            self.requested,
            self.succeeded,
            self.failed,
            self.records,
            self.relational,
            self.file,
            self.persisted
        )
    }
}

/// Sequences fetch → transform → persist for a fixed city list
pub struct PipelineRunner {
    cities: Vec<CityName>,
    fetcher: BatchFetcher,
    transformer: RecordTransformer,
    relational: Arc<dyn RelationalSinkPort>,
    file: Arc<dyn FileSinkPort>,
}

impl fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("cities", &self.cities)
            .field("fetcher", &self.fetcher)
            .field("file", &self.file.location())
            .finish_non_exhaustive()
    }
}

impl PipelineRunner {
    /// Create a runner over the given cities and sinks
    #[must_use]
    pub fn new(
        cities: Vec<CityName>,
        fetcher: BatchFetcher,
        relational: Arc<dyn RelationalSinkPort>,
        file: Arc<dyn FileSinkPort>,
    ) -> Self {
        Self {
            cities,
            fetcher,
            transformer: RecordTransformer::new(),
            relational,
            file,
        }
    }

    /// Cities fetched on every run
    #[must_use]
    pub fn cities(&self) -> &[CityName] {
        &self.cities
    }

    /// Execute one run
    ///
    /// # Errors
    ///
    /// Only a failed schema bootstrap ends the run with an error. Fetch,
    /// transform and sink failures are logged and reflected in the outcome.
    #[instrument(skip(self), fields(cities = self.cities.len()))]
    pub async fn run(&self) -> Result<PipelineOutcome, ApplicationError> {
        info!("Running job at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

        self.relational.ensure_schema().await.inspect_err(|e| {
            error!(error = %e, "Schema bootstrap failed, aborting run");
        })?;

        let results = self.fetcher.fetch_all(&self.cities).await;
        let records = self.transformer.transform(&results);

        let mut outcome = PipelineOutcome {
            requested: results.len(),
            succeeded: results.succeeded(),
            failed: results.failed(),
            records: records.len(),
            relational: SinkStatus::Skipped,
            file: SinkStatus::Skipped,
            persisted: false,
        };

        if records.is_empty() {
            warn!("No valid data to process");
            info!(%outcome, "Pipeline finished");
            return Ok(outcome);
        }

        let columns = normalize_field_names(&FIELD_LABELS);
        outcome.relational = self.load_relational(&columns, &records).await;
        outcome.file = self.load_file(&records).await;
        outcome.persisted = outcome.relational.is_loaded() || outcome.file.is_loaded();

        if outcome.relational.is_loaded() && outcome.file.is_loaded() {
            info!(%outcome, "Data pulled and loaded successfully");
        } else {
            warn!(%outcome, "Pipeline finished with sink failures");
        }
        Ok(outcome)
    }

    async fn load_relational(&self, columns: &[String], records: &[WeatherRecord]) -> SinkStatus {
        match self.relational.append(columns, records).await {
            Ok(status) => Self::loaded("database", status),
            Err(e) => {
                error!(sink = "database", error = %e, "Error loading data into database");
                SinkStatus::Failed(e.to_string())
            },
        }
    }

    async fn load_file(&self, records: &[WeatherRecord]) -> SinkStatus {
        match self.file.append(records).await {
            Ok(status) => Self::loaded("file", status),
            Err(e) => {
                error!(
                    sink = "file",
                    path = %self.file.location(),
                    error = %e,
                    "Error saving data to file"
                );
                SinkStatus::Failed(e.to_string())
            },
        }
    }

    fn loaded(sink: &str, status: LoadStatus) -> SinkStatus {
        match status {
            LoadStatus::NothingToLoad => {
                info!(sink, "Nothing to load");
                SinkStatus::Skipped
            },
            LoadStatus::Loaded(rows) => {
                info!(sink, rows, "Data successfully loaded");
                SinkStatus::Loaded(rows)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::ports::{
        FetchError, FetchFailure, MockFileSinkPort, MockRelationalSinkPort, MockWeatherPort,
    };
    use domain::{ConditionEntry, MainReadings, RawObservation, WindReadings};

    fn cities(names: &[&str]) -> Vec<CityName> {
        names.iter().map(|n| CityName::new(*n).unwrap()).collect()
    }

    fn seattle_payload() -> RawObservation {
        RawObservation {
            name: Some("Seattle".to_string()),
            main: Some(MainReadings {
                temp: Some(55.2),
                feels_like: Some(54.3),
                humidity: Some(80),
            }),
            weather: Some(vec![ConditionEntry {
                description: Some("light rain".to_string()),
            }]),
            wind: Some(WindReadings { speed: Some(6.1) }),
        }
    }

    /// Seattle succeeds, every other city times out
    fn seattle_only_port() -> MockWeatherPort {
        let mut port = MockWeatherPort::new();
        port.expect_fetch_observation().returning(|city, _| {
            if city.as_str() == "Seattle" {
                Ok(seattle_payload())
            } else {
                Err(FetchError::new(
                    city.clone(),
                    FetchFailure::Timeout("operation timed out".to_string()),
                ))
            }
        });
        port
    }

    fn failing_port() -> MockWeatherPort {
        let mut port = MockWeatherPort::new();
        port.expect_fetch_observation().returning(|city, _| {
            Err(FetchError::new(
                city.clone(),
                FetchFailure::Connection("dns error".to_string()),
            ))
        });
        port
    }

    fn runner(
        names: &[&str],
        port: MockWeatherPort,
        relational: MockRelationalSinkPort,
        file: MockFileSinkPort,
    ) -> PipelineRunner {
        PipelineRunner::new(
            cities(names),
            BatchFetcher::new(Arc::new(port), Duration::from_secs(10)),
            Arc::new(relational),
            Arc::new(file),
        )
    }

    fn file_sink() -> MockFileSinkPort {
        let mut file = MockFileSinkPort::new();
        file.expect_location()
            .returning(|| "weather_data.csv".to_string());
        file
    }

    #[tokio::test]
    async fn seattle_succeeds_atlanta_times_out() {
        let mut relational = MockRelationalSinkPort::new();
        relational.expect_ensure_schema().times(1).returning(|| Ok(()));
        relational
            .expect_append()
            .times(1)
            .withf(|columns, records| {
                columns.len() == 7
                    && columns[2] == "Feels_Like_F"
                    && records.len() == 1
                    && records[0].city == "Seattle"
                    && (records[0].temperature - 55.2).abs() < f64::EPSILON
                    && records[0].humidity.value() == 80
                    && records[0].condition == "light rain"
                    && (records[0].wind_speed - 6.1).abs() < f64::EPSILON
            })
            .returning(|_, records| Ok(LoadStatus::Loaded(records.len())));

        let mut file = file_sink();
        file.expect_append()
            .times(1)
            .withf(|records| records.len() == 1)
            .returning(|records| Ok(LoadStatus::Loaded(records.len())));

        let outcome = runner(&["Seattle", "Atlanta"], seattle_only_port(), relational, file)
            .run()
            .await
            .unwrap();

        assert_eq!(outcome.requested, 2);
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.records, 1);
        assert_eq!(outcome.relational, SinkStatus::Loaded(1));
        assert_eq!(outcome.file, SinkStatus::Loaded(1));
        assert!(outcome.persisted);
    }

    #[tokio::test]
    async fn all_failures_write_nothing() {
        let mut relational = MockRelationalSinkPort::new();
        relational.expect_ensure_schema().times(1).returning(|| Ok(()));
        relational.expect_append().times(0);

        let mut file = file_sink();
        file.expect_append().times(0);

        let outcome = runner(&["Seattle", "Atlanta"], failing_port(), relational, file)
            .run()
            .await
            .unwrap();

        assert_eq!(outcome.records, 0);
        assert_eq!(outcome.failed, 2);
        assert_eq!(outcome.relational, SinkStatus::Skipped);
        assert_eq!(outcome.file, SinkStatus::Skipped);
        assert!(!outcome.persisted);
    }

    #[tokio::test]
    async fn relational_failure_still_writes_file() {
        let mut relational = MockRelationalSinkPort::new();
        relational.expect_ensure_schema().returning(|| Ok(()));
        relational
            .expect_append()
            .times(1)
            .returning(|_, _| Err(ApplicationError::Persistence("database is locked".into())));

        let mut file = file_sink();
        file.expect_append()
            .times(1)
            .returning(|records| Ok(LoadStatus::Loaded(records.len())));

        let outcome = runner(&["Seattle"], seattle_only_port(), relational, file)
            .run()
            .await
            .unwrap();

        assert!(matches!(outcome.relational, SinkStatus::Failed(ref m) if m.contains("locked")));
        assert_eq!(outcome.file, SinkStatus::Loaded(1));
        assert!(outcome.persisted);
    }

    #[tokio::test]
    async fn both_sinks_failing_is_not_persisted() {
        let mut relational = MockRelationalSinkPort::new();
        relational.expect_ensure_schema().returning(|| Ok(()));
        relational
            .expect_append()
            .returning(|_, _| Err(ApplicationError::Persistence("no such table".into())));

        let mut file = file_sink();
        file.expect_append()
            .returning(|_| Err(ApplicationError::Persistence("permission denied".into())));

        let outcome = runner(&["Seattle"], seattle_only_port(), relational, file)
            .run()
            .await
            .unwrap();

        assert_eq!(outcome.records, 1);
        assert!(!outcome.persisted);
    }

    #[tokio::test]
    async fn schema_failure_aborts_before_fetching() {
        let mut port = MockWeatherPort::new();
        port.expect_fetch_observation().times(0);

        let mut relational = MockRelationalSinkPort::new();
        relational
            .expect_ensure_schema()
            .returning(|| Err(ApplicationError::Persistence("unable to open database".into())));
        relational.expect_append().times(0);

        let mut file = file_sink();
        file.expect_append().times(0);

        let result = runner(&["Seattle"], port, relational, file).run().await;

        assert!(matches!(result, Err(ApplicationError::Persistence(_))));
    }

    #[test]
    fn outcome_display_summarizes_run() {
        let outcome = PipelineOutcome {
            requested: 2,
            succeeded: 1,
            failed: 1,
            records: 1,
            relational: SinkStatus::Loaded(1),
            file: SinkStatus::Failed("disk full".to_string()),
            persisted: true,
        };
        assert_eq!(
            outcome.to_string(),
            "2 requested, 1 succeeded, 1 failed, 1 records; database: 1 rows, \
             file: failed (disk full); persisted=true"
        );
    }

    #[test]
    fn sink_status_serializes_tagged() {
        let json = serde_json::to_string(&SinkStatus::Loaded(3)).unwrap();
        assert_eq!(json, r#"{"status":"loaded","detail":3}"#);
    }
}
