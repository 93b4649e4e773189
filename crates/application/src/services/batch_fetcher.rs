//! Batch fetcher
//!
//! Drives the weather port across the configured city list. A failure for
//! one city is recorded against that city and never stops the others.

use std::sync::Arc;
use std::time::Duration;

use domain::{CityName, RawObservation};
use tracing::{debug, info, instrument, warn};

use crate::ports::{FetchError, WeatherPort};

/// Outcome of fetching one city
pub type FetchOutcome = Result<RawObservation, FetchError>;

/// Per-city fetch outcomes, in the order the cities were requested
///
/// Each city appears at most once.
#[derive(Debug, Default)]
pub struct FetchResults {
    entries: Vec<(CityName, FetchOutcome)>,
}

impl FetchResults {
    /// Create an empty result set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record the outcome for a city
    ///
    /// Returns `false` and keeps the existing entry if the city is already present.
    pub fn insert(&mut self, city: CityName, outcome: FetchOutcome) -> bool {
        if self.contains(&city) {
            return false;
        }
        self.entries.push((city, outcome));
        true
    }

    /// Whether an outcome is recorded for the city
    #[must_use]
    pub fn contains(&self, city: &CityName) -> bool {
        self.entries.iter().any(|(c, _)| c == city)
    }

    /// Outcome recorded for the city, if any
    #[must_use]
    pub fn get(&self, city: &CityName) -> Option<&FetchOutcome> {
        self.entries
            .iter()
            .find(|(c, _)| c == city)
            .map(|(_, outcome)| outcome)
    }

    /// Iterate over `(city, outcome)` pairs in request order
    pub fn iter(&self) -> impl Iterator<Item = (&CityName, &FetchOutcome)> {
        self.entries.iter().map(|(c, o)| (c, o))
    }

    /// Number of cities attempted
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no city was attempted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cities whose fetch returned a payload
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_ok()).count()
    }

    /// The failures, in request order
    pub fn failures(&self) -> impl Iterator<Item = &FetchError> {
        self.entries.iter().filter_map(|(_, o)| o.as_ref().err())
    }

    /// Number of cities whose fetch failed
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures().count()
    }
}

/// Fetches every configured city one at a time
pub struct BatchFetcher {
    weather: Arc<dyn WeatherPort>,
    timeout: Duration,
}

impl std::fmt::Debug for BatchFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchFetcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl BatchFetcher {
    /// Create a fetcher that bounds each request by `timeout`
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, timeout: Duration) -> Self {
        Self { weather, timeout }
    }

    /// Fetch all cities sequentially
    ///
    /// Never fails as a whole: each city ends up in the result with either a
    /// payload or its error. Repeated names are fetched once.
    #[instrument(skip(self, cities), fields(cities = cities.len()))]
    pub async fn fetch_all(&self, cities: &[CityName]) -> FetchResults {
        let mut results = FetchResults::new();

        for city in cities {
            if results.contains(city) {
                warn!(city = %city, "Duplicate city in batch, skipping");
                continue;
            }

            let outcome = self.weather.fetch_observation(city, self.timeout).await;
            match &outcome {
                Ok(_) => debug!(city = %city, "Fetched observation"),
                Err(e) => warn!(city = %city, error = %e.cause, "Error fetching weather data"),
            }
            results.insert(city.clone(), outcome);
        }

        info!(
            requested = results.len(),
            succeeded = results.succeeded(),
            failed = results.failed(),
            "Batch fetch complete"
        );
        results
    }
}
