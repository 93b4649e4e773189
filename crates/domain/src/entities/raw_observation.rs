//! Raw observation as returned by the current-weather endpoint
//!
//! Every level of the payload is optional so that a missing key decodes to
//! `None` instead of failing the whole response. Fields the pipeline does not
//! use (coordinates, `dt`, visibility, ...) are ignored during decoding.

use serde::{Deserialize, Serialize};

/// Unparsed-but-decoded current weather payload for one city
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Resolved city name
    #[serde(default)]
    pub name: Option<String>,
    /// Temperature and humidity block
    #[serde(default)]
    pub main: Option<MainReadings>,
    /// Condition entries, most significant first
    #[serde(default)]
    pub weather: Option<Vec<ConditionEntry>>,
    /// Wind block
    #[serde(default)]
    pub wind: Option<WindReadings>,
}

/// The `main` block of the payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Air temperature in the requested unit system
    #[serde(default)]
    pub temp: Option<f64>,
    /// Apparent temperature in the requested unit system
    #[serde(default)]
    pub feels_like: Option<f64>,
    /// Relative humidity percentage
    #[serde(default)]
    pub humidity: Option<i64>,
}

/// One entry of the `weather` array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionEntry {
    /// Free-text condition, e.g. "light rain"
    #[serde(default)]
    pub description: Option<String>,
}

/// The `wind` block of the payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindReadings {
    /// Wind speed in the requested unit system
    #[serde(default)]
    pub speed: Option<f64>,
}

impl RawObservation {
    /// `name`
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `main.temp`
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    /// `main.feels_like`
    #[must_use]
    pub fn feels_like(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.feels_like)
    }

    /// `main.humidity`
    #[must_use]
    pub fn humidity(&self) -> Option<i64> {
        self.main.as_ref().and_then(|m| m.humidity)
    }

    /// `weather[0].description`
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.weather
            .as_ref()
            .and_then(|entries| entries.first())
            .and_then(|entry| entry.description.as_deref())
    }

    /// `wind.speed`
    #[must_use]
    pub fn wind_speed(&self) -> Option<f64> {
        self.wind.as_ref().and_then(|w| w.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> serde_json::Value {
        serde_json::json!({
            "coord": { "lon": -122.33, "lat": 47.61 },
            "weather": [
                { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" },
                { "id": 701, "main": "Mist", "description": "mist", "icon": "50d" }
            ],
            "main": { "temp": 55.2, "feels_like": 54.1, "humidity": 80, "pressure": 1012 },
            "wind": { "speed": 6.1, "deg": 200 },
            "dt": 1_700_000_000,
            "name": "Seattle"
        })
    }

    #[test]
    fn decodes_full_payload() {
        let raw: RawObservation = serde_json::from_value(full_payload()).unwrap();
        assert_eq!(raw.city(), Some("Seattle"));
        assert_eq!(raw.temperature(), Some(55.2));
        assert_eq!(raw.feels_like(), Some(54.1));
        assert_eq!(raw.humidity(), Some(80));
        assert_eq!(raw.condition(), Some("light rain"));
        assert_eq!(raw.wind_speed(), Some(6.1));
    }

    #[test]
    fn missing_nested_keys_decode_as_none() {
        let raw: RawObservation = serde_json::from_value(serde_json::json!({
            "name": "Miami",
            "main": { "temp": 80.0 }
        }))
        .unwrap();

        assert_eq!(raw.city(), Some("Miami"));
        assert_eq!(raw.temperature(), Some(80.0));
        assert_eq!(raw.feels_like(), None);
        assert_eq!(raw.humidity(), None);
        assert_eq!(raw.condition(), None);
        assert_eq!(raw.wind_speed(), None);
    }

    #[test]
    fn empty_weather_array_has_no_condition() {
        let raw: RawObservation = serde_json::from_value(serde_json::json!({
            "weather": []
        }))
        .unwrap();
        assert_eq!(raw.condition(), None);
    }

    #[test]
    fn explicit_nulls_decode_as_none() {
        let raw: RawObservation = serde_json::from_value(serde_json::json!({
            "name": null,
            "wind": { "speed": null }
        }))
        .unwrap();
        assert_eq!(raw.city(), None);
        assert_eq!(raw.wind_speed(), None);
    }

    #[test]
    fn empty_object_is_all_absent() {
        let raw: RawObservation = serde_json::from_str("{}").unwrap();
        assert_eq!(raw, RawObservation::default());
    }
}
