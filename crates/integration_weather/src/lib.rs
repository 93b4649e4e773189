//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap current-weather endpoint
//! (<https://openweathermap.org/current>). One request per city, decoded into
//! the domain's optional-field [`domain::RawObservation`].

pub mod client;

pub use client::{OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError};
