//! Normalized weather record
//!
//! The unit of value the pipeline persists. A record only exists when every
//! field could be filled; incomplete observations never become records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Humidity;

/// Human-readable field labels, in column order
///
/// Used verbatim as the CSV header and, after name normalization, as the
/// relational column list.
pub const FIELD_LABELS: [&str; 7] = [
    "City",
    "Temperature",
    "Feels Like (°F)",
    "Humidity (%)",
    "Weather Condition",
    "Wind Speed (mph)",
    "Timestamp",
];

/// One weather snapshot for a city at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// City name as resolved by the weather API
    pub city: String,
    /// Temperature in °F
    pub temperature: f64,
    /// Apparent temperature in °F
    pub feels_like: f64,
    /// Relative humidity
    pub humidity: Humidity,
    /// Free-text condition, e.g. "light rain"
    pub condition: String,
    /// Wind speed in mph
    pub wind_speed: f64,
    /// Capture time (when the record was built, not the API's timestamp)
    pub observed_at: DateTime<Utc>,
}

impl WeatherRecord {
    /// Format used for the timestamp in every sink
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S%.6f";

    /// Capture time rendered with [`Self::TIMESTAMP_FORMAT`]
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.observed_at.format(Self::TIMESTAMP_FORMAT).to_string()
    }

    /// Field values rendered as text, in [`FIELD_LABELS`] order
    #[must_use]
    pub fn to_row(&self) -> [String; 7] {
        [
            self.city.clone(),
            render_reading(self.temperature),
            render_reading(self.feels_like),
            self.humidity.value().to_string(),
            self.condition.clone(),
            render_reading(self.wind_speed),
            self.formatted_timestamp(),
        ]
    }
}

/// Render a float reading, always with a fractional part (`71.0`, `55.25`)
fn render_reading(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
