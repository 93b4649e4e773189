//! Weather observation port
//!
//! Defines the interface for retrieving one city's current observation.

use std::time::Duration;

use async_trait::async_trait;
use domain::{CityName, RawObservation};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Why a single city's fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// No complete response within the timeout
    #[error("timed out: {0}")]
    Timeout(String),

    /// DNS, refused or reset connection
    #[error("connection failed: {0}")]
    Connection(String),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Message reported by the service
        message: String,
    },

    /// The body could not be decoded as an observation
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Any other transport failure
    #[error("request failed: {0}")]
    Request(String),
}

/// A failed fetch for one city
///
/// Carried as data in the batch results rather than propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch weather for {city}: {cause}")]
pub struct FetchError {
    /// The city whose fetch failed
    pub city: CityName,
    /// Underlying cause
    pub cause: FetchFailure,
}

impl FetchError {
    /// Create a new fetch error
    #[must_use]
    pub const fn new(city: CityName, cause: FetchFailure) -> Self {
        Self { city, cause }
    }
}

/// Port for weather observation retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch the current observation for one city
    ///
    /// Issues a single request bounded by `timeout`; never retries.
    async fn fetch_observation(
        &self,
        city: &CityName,
        timeout: Duration,
    ) -> Result<RawObservation, FetchError>;
}
