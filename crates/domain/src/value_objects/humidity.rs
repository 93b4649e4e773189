//! Humidity value object
//!
//! Represents a validated relative humidity percentage (0-100%).
//!
//! # Examples
//!
//! ```
//! use domain::Humidity;
//!
//! let h = Humidity::new(80).expect("valid humidity");
//! assert_eq!(h.value(), 80);
//!
//! assert!(Humidity::new(101).is_err());
//! assert!(Humidity::from_reading(-3).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a humidity reading is out of range
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid humidity: {0}% is out of range (must be 0-100)")]
pub struct InvalidHumidity(i64);

/// Relative humidity percentage (0-100%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Humidity(u8);

impl Humidity {
    /// Maximum valid humidity percentage
    pub const MAX: u8 = 100;

    /// Create a new validated humidity value
    ///
    /// # Errors
    ///
    /// Returns `InvalidHumidity` if the value is greater than 100.
    pub const fn new(value: u8) -> Result<Self, InvalidHumidity> {
        if value > Self::MAX {
            Err(InvalidHumidity(value as i64))
        } else {
            Ok(Self(value))
        }
    }

    /// Validate a raw integer reading as reported by the weather API
    ///
    /// # Errors
    ///
    /// Returns `InvalidHumidity` for negative readings or readings above 100.
    pub fn from_reading(reading: i64) -> Result<Self, InvalidHumidity> {
        u8::try_from(reading)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(InvalidHumidity(reading))
    }

    /// Get the humidity value as a u8
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Humidity {
    type Error = InvalidHumidity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Humidity> for u8 {
    fn from(h: Humidity) -> Self {
        h.0
    }
}

impl From<Humidity> for i64 {
    fn from(h: Humidity) -> Self {
        Self::from(h.0)
    }
}

/// Custom deserialization that validates humidity values
impl<'de> Deserialize<'de> for Humidity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humidity_new_valid() {
        assert!(Humidity::new(0).is_ok());
        assert!(Humidity::new(50).is_ok());
        assert!(Humidity::new(100).is_ok());
    }

    #[test]
    fn test_humidity_new_invalid() {
        let result = Humidity::new(101);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "invalid humidity: 101% is out of range (must be 0-100)"
        );
    }

    #[test]
    fn test_from_reading_bounds() {
        assert_eq!(Humidity::from_reading(0).unwrap().value(), 0);
        assert_eq!(Humidity::from_reading(80).unwrap().value(), 80);
        assert_eq!(Humidity::from_reading(100).unwrap().value(), 100);
        assert!(Humidity::from_reading(101).is_err());
        assert!(Humidity::from_reading(-1).is_err());
        assert!(Humidity::from_reading(i64::MAX).is_err());
    }

    #[test]
    fn test_from_reading_error_reports_original_value() {
        let err = Humidity::from_reading(-5).unwrap_err();
        assert!(err.to_string().contains("-5%"));
    }

    #[test]
    fn test_humidity_display() {
        assert_eq!(format!("{}", Humidity::new(65).unwrap()), "65%");
    }

    #[test]
    fn test_into_integer() {
        let h = Humidity::new(42).unwrap();
        assert_eq!(u8::from(h), 42);
        assert_eq!(i64::from(h), 42);
    }

    #[test]
    fn test_humidity_deserialize_validates() {
        let h: Humidity = serde_json::from_str("75").unwrap();
        assert_eq!(h.value(), 75);

        let result: Result<Humidity, _> = serde_json::from_str("150");
        assert!(result.is_err());
    }
}
