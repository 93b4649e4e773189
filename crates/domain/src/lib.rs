//! Domain layer for the weather ETL pipeline
//!
//! Contains the normalized weather record, the loosely-shaped raw observation
//! it is derived from, value objects, and domain errors.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
