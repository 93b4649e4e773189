//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap current-weather API.

use std::time::Duration;

use async_trait::async_trait;
use domain::RawObservation;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request did not complete within the allotted time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection to the weather service failed (DNS, refused, reset)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed for another transport reason
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Status code returned by the service
        status: u16,
        /// Message extracted from the error body, if any
        message: String,
    },

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl WeatherError {
    fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as the `appid` query parameter
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Unit system: `imperial`, `metric` or `standard` (default: imperial)
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_units() -> String {
    "imperial".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
            units: default_units(),
        }
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("units", &self.units)
            .finish()
    }
}

impl WeatherConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Weather client trait for fetching current observations
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetch the current observation for a city by name
    ///
    /// Issues exactly one request and never retries.
    async fn current_by_city(
        &self,
        city: &str,
        timeout: Duration,
    ) -> Result<RawObservation, WeatherError>;
}

/// Error body returned by the API (`{"cod": "404", "message": "city not found"}`)
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// OpenWeatherMap HTTP client implementation
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }

    /// Pull a readable message out of an error body, falling back to the raw text
    fn error_message(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| body.trim().to_string())
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self), fields(units = %self.config.units))]
    async fn current_by_city(
        &self,
        city: &str,
        timeout: Duration,
    ) -> Result<RawObservation, WeatherError> {
        let url = self.endpoint();
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", self.config.units.as_str()),
            ])
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| WeatherError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::HttpStatus {
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::from_transport(&e))?;

        serde_json::from_str::<RawObservation>(&body)
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}
