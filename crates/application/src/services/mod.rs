//! Application services - The pipeline stages and their runner

mod batch_fetcher;
mod pipeline_runner;
mod record_transformer;
mod schema_normalizer;

pub use batch_fetcher::{BatchFetcher, FetchOutcome, FetchResults};
pub use pipeline_runner::{PipelineOutcome, PipelineRunner, SinkStatus};
pub use record_transformer::RecordTransformer;
pub use schema_normalizer::{normalize_field_name, normalize_field_names};
