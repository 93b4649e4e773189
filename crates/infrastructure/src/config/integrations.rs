//! Weather API configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// OpenWeatherMap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// API key (required; sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,

    /// Unit system requested from the API
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_weather_timeout() -> u64 {
    10
}

fn default_units() -> String {
    "imperial".to_string()
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_secs: default_weather_timeout(),
            units: default_units(),
        }
    }
}

impl WeatherAppConfig {
    /// The API key, if set to something other than whitespace
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.trim().is_empty())
    }

    /// Build the client configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingApiKey` if no usable key is configured.
    pub fn to_client_config(&self) -> Result<integration_weather::WeatherConfig, ConfigError> {
        let api_key = self.api_key().ok_or(ConfigError::MissingApiKey)?;
        Ok(integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
            timeout_secs: self.timeout_secs,
            units: self.units.clone(),
        })
    }
}
