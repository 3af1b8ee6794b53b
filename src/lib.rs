//! `WeatherBlog` - on-demand Indian weather blog publishing
//!
//! Collects current conditions for a fixed set of cities, asks a language
//! model to write a post around them, publishes it to a Webflow CMS
//! collection and emails the resulting link.

pub mod api;
pub mod config;
pub mod email;
pub mod error;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod publisher;
pub mod render;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::WeatherBlogConfig;
pub use email::{Mailer, Notifier};
pub use error::WeatherBlogError;
pub use generator::ContentGenerator;
pub use models::{BlogDocument, LocationSpec, ObservationRecord};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use publisher::{PublishResult, Publisher};
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherBlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
