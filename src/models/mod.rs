//! Data models for the weather blog pipeline
//!
//! - Location: the configured cities and their coordinates
//! - Weather: formatted observations and the weather-code lookup
//! - Blog: the generated post and its placeholder handling

pub mod blog;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use blog::{BlogDocument, TABLE_PLACEHOLDER};
pub use location::{LocationSpec, default_locations};
pub use weather::{CONDITION_UNAVAILABLE, ObservationRecord, weather_code_to_description};
