//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// City name is empty or otherwise unusable
    #[error("Invalid city name: {0:?}")]
    InvalidCityName(String),
}
