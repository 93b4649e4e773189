//! Port definitions for application layer
//!
//! Ports are interfaces that define how the pipeline interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod file_sink_port;
mod relational_sink_port;
mod weather_port;

#[cfg(test)]
pub use file_sink_port::MockFileSinkPort;
pub use file_sink_port::FileSinkPort;
#[cfg(test)]
pub use relational_sink_port::MockRelationalSinkPort;
pub use relational_sink_port::{LoadStatus, RelationalSinkPort};
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::{FetchError, FetchFailure, WeatherPort};
