//! Batch and output configuration.

use serde::{Deserialize, Deserializer, Serialize};

/// Cities fetched on every run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// City names, in fetch order
    ///
    /// Accepts a list or a single comma-separated string, as set through
    /// `WEATHER_ETL__PIPELINE__CITIES`.
    #[serde(default = "default_cities", deserialize_with = "deserialize_cities")]
    pub cities: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CityList {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_cities<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CityList::deserialize(deserializer)? {
        CityList::List(cities) => cities,
        CityList::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

fn default_cities() -> Vec<String> {
    [
        "Seattle",
        "Los Angeles",
        "Las Vegas",
        "Fort Worth",
        "Miami",
        "Nashville",
        "New York",
    ]
    .iter()
    .map(|c| (*c).to_string())
    .collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cities: default_cities(),
        }
    }
}

/// Flat-file sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV log
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
}

fn default_csv_path() -> String {
    "weather_data.csv".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}
