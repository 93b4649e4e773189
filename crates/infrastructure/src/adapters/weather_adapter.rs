//! Weather adapter - Implements WeatherPort using integration_weather

use std::time::Duration;

use application::error::ApplicationError;
use application::ports::{FetchError, FetchFailure, WeatherPort};
use async_trait::async_trait;
use domain::{CityName, RawObservation};
use integration_weather::{OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError};
use tracing::{debug, instrument};

/// Adapter for the OpenWeatherMap current-conditions API
pub struct WeatherAdapter {
    client: OpenWeatherClient,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenWeatherClient")
            .field("base_url", &self.client.config().base_url)
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with the given client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenWeatherClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map an integration error to the per-city failure cause
    fn map_error(err: WeatherError) -> FetchFailure {
        match err {
            WeatherError::Timeout(e) => FetchFailure::Timeout(e),
            WeatherError::ConnectionFailed(e) => FetchFailure::Connection(e),
            WeatherError::RequestFailed(e) => FetchFailure::Request(e),
            WeatherError::HttpStatus { status, message } => {
                FetchFailure::HttpStatus { status, message }
            },
            WeatherError::ParseError(e) => FetchFailure::InvalidPayload(e),
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city))]
    async fn fetch_observation(
        &self,
        city: &CityName,
        timeout: Duration,
    ) -> Result<RawObservation, FetchError> {
        let result = self.client.current_by_city(city.as_str(), timeout).await;

        match &result {
            Ok(observation) => {
                debug!(resolved = ?observation.city(), "Retrieved current weather");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current weather");
            },
        }

        result.map_err(|e| FetchError::new(city.clone(), Self::map_error(e)))
    }
}
