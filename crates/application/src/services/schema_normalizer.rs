//! Field name normalization for the relational sink
//!
//! Turns human-readable labels such as `"Feels Like (°F)"` into identifiers
//! such as `"Feels_Like_F"`.
//!
//! # Examples
//!
//! ```
//! use application::normalize_field_names;
//!
//! let columns = normalize_field_names(&["City", "Wind Speed (mph)", " Humidity (%) "]);
//! assert_eq!(columns, vec!["City", "Wind_Speed_mph", "Humidity"]);
//! ```

/// Normalize a single field name
///
/// 1. trim surrounding whitespace
/// 2. drop every character that is not alphanumeric, `_`, or whitespace
/// 3. join the remaining whitespace-separated words with a single `_`
///
/// Idempotent: the output contains only alphanumerics and `_`.
#[must_use]
pub fn normalize_field_name(name: &str) -> String {
    let kept: String = name
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Normalize a header, preserving order
#[must_use]
pub fn normalize_field_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| normalize_field_name(name.as_ref()))
        .collect()
}
