//! Relational sink port
//!
//! Defines the interface for the append-only weather table.

use async_trait::async_trait;
use domain::WeatherRecord;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Result of an append to either sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// The batch was empty; nothing was written
    NothingToLoad,
    /// This many rows were appended
    Loaded(usize),
}

/// Port for the relational store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RelationalSinkPort: Send + Sync {
    /// Create the backing table if it does not exist
    ///
    /// Safe to call on every run; never drops or alters an existing table.
    async fn ensure_schema(&self) -> Result<(), ApplicationError>;

    /// Insert one row per record into the given (normalized) columns
    ///
    /// `columns` is in the same order as [`domain::FIELD_LABELS`]. Existing
    /// rows are never updated or deleted.
    async fn append(
        &self,
        columns: &[String],
        records: &[WeatherRecord],
    ) -> Result<LoadStatus, ApplicationError>;
}
