//! Persistence module
//!
//! SQLite-backed weather table and the append-only CSV log.

pub mod connection;
pub mod csv_log;
pub mod weather_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use csv_log::{CsvLogError, CsvWeatherLog};
pub use weather_store::{SqliteWeatherStore, WEATHER_COLUMNS, WEATHER_TABLE};
