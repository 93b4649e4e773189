//! Flat-file sink port
//!
//! Defines the interface for the append-only delimited log.

use async_trait::async_trait;
use domain::WeatherRecord;
#[cfg(test)]
use mockall::automock;

use super::LoadStatus;
use crate::error::ApplicationError;

/// Port for the flat-file log
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileSinkPort: Send + Sync {
    /// Append records, writing the header first only if the file is new
    async fn append(&self, records: &[WeatherRecord]) -> Result<LoadStatus, ApplicationError>;

    /// Where the log lives, for reporting
    fn location(&self) -> String;
}
