//! Record transformer
//!
//! Turns successful fetches into normalized [`WeatherRecord`]s. Failed
//! fetches and payloads missing any required field are skipped, never
//! null-filled.

use chrono::{DateTime, Utc};
use domain::{Humidity, RawObservation, WeatherRecord};
use tracing::{debug, instrument};

use super::batch_fetcher::FetchResults;

/// Maps raw observations to weather records
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordTransformer;

impl RecordTransformer {
    /// Create a new transformer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Transform a batch, stamping records with the current wall-clock time
    pub fn transform(&self, results: &FetchResults) -> Vec<WeatherRecord> {
        self.transform_at(results, Utc::now())
    }

    /// Transform a batch, stamping every surviving record with `observed_at`
    ///
    /// Output order follows the batch order.
    #[instrument(skip(self, results), fields(entries = results.len()))]
    pub fn transform_at(
        &self,
        results: &FetchResults,
        observed_at: DateTime<Utc>,
    ) -> Vec<WeatherRecord> {
        let records: Vec<WeatherRecord> = results
            .iter()
            .filter_map(|(city, outcome)| {
                let raw = outcome.as_ref().ok()?;
                match Self::build_record(raw, observed_at) {
                    Ok(record) => Some(record),
                    Err(missing) => {
                        debug!(city = %city, field = missing, "Dropping incomplete observation");
                        None
                    },
                }
            })
            .collect();

        debug!(records = records.len(), "Transformed batch");
        records
    }

    /// Build a record, or name the first required field that is missing or invalid
    fn build_record(
        raw: &RawObservation,
        observed_at: DateTime<Utc>,
    ) -> Result<WeatherRecord, &'static str> {
        let city = raw.city().ok_or("name")?;
        let temperature = raw.temperature().ok_or("main.temp")?;
        let feels_like = raw.feels_like().ok_or("main.feels_like")?;
        let humidity = raw
            .humidity()
            .and_then(|h| Humidity::from_reading(h).ok())
            .ok_or("main.humidity")?;
        let condition = raw.condition().ok_or("weather[0].description")?;
        let wind_speed = raw.wind_speed().ok_or("wind.speed")?;

        Ok(WeatherRecord {
            city: city.to_string(),
            temperature,
            feels_like,
            humidity,
            condition: condition.to_string(),
            wind_speed,
            observed_at,
        })
    }
}
