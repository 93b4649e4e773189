//! Domain entities - Observations and the records derived from them

mod raw_observation;
mod weather_record;

pub use raw_observation::{ConditionEntry, MainReadings, RawObservation, WindReadings};
pub use weather_record::{FIELD_LABELS, WeatherRecord};
