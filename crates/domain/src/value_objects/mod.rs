//! Value Objects - Immutable, identity-less domain primitives

mod city_name;
mod humidity;

pub use city_name::CityName;
pub use humidity::{Humidity, InvalidHumidity};
