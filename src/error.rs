//! Error types and handling for the weather blog pipeline

use thiserror::Error;

/// Main error type for the weather blog pipeline
#[derive(Error, Debug)]
pub enum WeatherBlogError {
    /// Missing or invalid configuration, reported before any network call
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather observations could not be collected
    #[error("Weather collection failed: {message}")]
    Collection { message: String },

    /// The completion provider failed or returned an unusable document
    #[error("Content generation failed: {message}")]
    Generation { message: String },

    /// The CMS rejected or failed the create-item call
    #[error("Publishing failed: {message}")]
    Publish { message: String },

    /// The notification email could not be sent
    #[error("Notification failed: {message}")]
    Notification { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherBlogError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new collection error
    pub fn collection<S: Into<String>>(message: S) -> Self {
        Self::Collection {
            message: message.into(),
        }
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create a new publish error
    pub fn publish<S: Into<String>>(message: S) -> Self {
        Self::Publish {
            message: message.into(),
        }
    }

    /// Create a new notification error
    pub fn notification<S: Into<String>>(message: S) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }

    /// Name of the pipeline stage the error belongs to, used as a log field
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            WeatherBlogError::Config { .. } => "config",
            WeatherBlogError::Collection { .. } => "collect",
            WeatherBlogError::Generation { .. } => "generate",
            WeatherBlogError::Publish { .. } => "publish",
            WeatherBlogError::Notification { .. } => "notify",
            WeatherBlogError::Io { .. } => "io",
        }
    }
}
