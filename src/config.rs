//! Configuration management for the weather blog service
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and provides validation for all configuration settings. The loaded
//! configuration is immutable and shared by every pipeline run.

use crate::models::{LocationSpec, default_locations};
use crate::{Result as PipelineResult, WeatherBlogError};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Root configuration structure for the weather blog service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherBlogConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Outbound HTTP client settings
    pub http: HttpConfig,
    /// Weather provider settings
    pub weather: WeatherConfig,
    /// Text-completion provider settings
    pub completion: CompletionConfig,
    /// Webflow CMS settings
    pub cms: CmsConfig,
    /// Public site settings
    pub site: SiteConfig,
    /// Email notification settings
    pub notification: NotificationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Cities covered by the report, in table order
    pub locations: Vec<LocationSpec>,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Outbound HTTP client settings shared by every provider call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds. `None` keeps the client default.
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo API
    pub base_url: String,
}

/// Text-completion provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// OpenRouter API key
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
}

/// Webflow CMS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Webflow API token
    pub api_key: Option<String>,
    /// Collection receiving the posts
    pub collection_id: Option<String>,
    /// Base URL of the Webflow data API
    pub base_url: String,
    /// Live satellite image attached to every post
    pub image_url: String,
    /// Field slugs of the target collection
    pub fields: CmsFieldSlugs,
}

/// Field slugs of the blog collection. `name` and `slug` are fixed by Webflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsFieldSlugs {
    pub image: String,
    pub meta_title: String,
    pub meta_description: String,
    pub body: String,
    pub schema: String,
}

/// Public site settings used to build post URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub post_path_prefix: String,
}

/// How notification emails are delivered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Resend HTTP API
    Resend,
    /// Plain SMTP relay
    Smtp,
}

/// Email notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub transport: MailTransport,
    /// Resend API key
    pub api_key: Option<String>,
    /// Base URL of the Resend API
    pub base_url: String,
    /// SMTP relay host
    pub smtp_relay: String,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// Sender mailbox, e.g. `WeatherBlog <automation@example.com>`
    pub from: String,
    /// Single recipient of the notification
    pub recipient: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
    /// OTLP/HTTP endpoint for trace export, disabled when unset
    pub otlp_endpoint: Option<String>,
}

/// Credentials every run needs before it may touch the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredCredentials {
    pub cms_api_key: String,
    pub cms_collection_id: String,
    pub completion_api_key: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_user_agent() -> String {
    format!("WeatherBlog/{}", env!("CARGO_PKG_VERSION"))
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_completion_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_completion_model() -> String {
    "mistralai/mistral-7b-instruct:free".to_string()
}

fn default_cms_base_url() -> String {
    "https://api.webflow.com/v2".to_string()
}

fn default_image_url() -> String {
    "https://mausam.imd.gov.in/imd_latest/contents/satellite/satellite_insat3d.jpg".to_string()
}

fn default_site_base_url() -> String {
    "https://hamarakhet-7013b6.webflow.io".to_string()
}

fn default_post_path_prefix() -> String {
    "/post/".to_string()
}

fn default_resend_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_smtp_relay() -> String {
    "smtp.gmail.com".to_string()
}

fn default_sender() -> String {
    "WeatherBlog <automation@example.com>".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherBlogConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            http: HttpConfig::default(),
            weather: WeatherConfig::default(),
            completion: CompletionConfig::default(),
            cms: CmsConfig::default(),
            site: SiteConfig::default(),
            notification: NotificationConfig::default(),
            logging: LoggingConfig::default(),
            locations: default_locations(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_completion_base_url(),
            model: default_completion_model(),
        }
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            collection_id: None,
            base_url: default_cms_base_url(),
            image_url: default_image_url(),
            fields: CmsFieldSlugs::default(),
        }
    }
}

impl Default for CmsFieldSlugs {
    fn default() -> Self {
        Self {
            image: "main-image".to_string(),
            meta_title: "meta-title".to_string(),
            meta_description: "meta-description".to_string(),
            body: "post-body".to_string(),
            schema: "schema".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_site_base_url(),
            post_path_prefix: default_post_path_prefix(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::Resend,
            api_key: None,
            base_url: default_resend_base_url(),
            smtp_relay: default_smtp_relay(),
            smtp_username: None,
            smtp_password: None,
            from: default_sender(),
            recipient: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl SiteConfig {
    /// Public URL of the post with the given slug
    #[must_use]
    pub fn post_url(&self, slug: &str) -> String {
        format!(
            "{}/{}{}",
            self.base_url.trim_end_matches('/'),
            self.post_path_prefix.trim_start_matches('/'),
            slug
        )
    }
}

impl LoggingConfig {
    /// Trace export endpoint, `None` when unset or blank
    #[must_use]
    pub fn export_endpoint(&self) -> Option<&str> {
        present(&self.otlp_endpoint)
    }
}

impl NotificationConfig {
    /// Whether enough is configured to attempt a send
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        let has_recipient = present(&self.recipient).is_some();
        let has_credentials = match self.transport {
            MailTransport::Resend => present(&self.api_key).is_some(),
            MailTransport::Smtp => {
                present(&self.smtp_username).is_some() && present(&self.smtp_password).is_some()
            }
        };
        has_recipient && has_credentials
    }
}

/// Treat empty strings the same as unset values
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl WeatherBlogConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(Self::get_config_path);

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERBLOG_CMS__COLLECTION_ID -> cms.collection_id
        builder = builder.add_source(
            Environment::with_prefix("WEATHERBLOG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Conventional variable names used by the hosting environment
        for (variable, key) in [
            ("WEBFLOW_API_KEY", "cms.api_key"),
            ("WEBFLOW_COLLECTION_ID", "cms.collection_id"),
            ("OPENROUTER_API_KEY", "completion.api_key"),
            ("RESEND_API_KEY", "notification.api_key"),
            ("NOTIFICATION_EMAIL", "notification.recipient"),
            ("GMAIL_ADDRESS", "notification.smtp_username"),
            ("GMAIL_APP_PASSWORD", "notification.smtp_password"),
            ("PORT", "server.port"),
        ] {
            builder = builder
                .set_override_option(key, env::var(variable).ok())
                .with_context(|| format!("Failed to apply {variable}"))?;
        }

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherBlogConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Configuration file path, `WEATHERBLOG_CONFIG` or `weatherblog.toml`
    #[must_use]
    pub fn get_config_path() -> PathBuf {
        env::var_os("WEATHERBLOG_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("weatherblog.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.completion.base_url.is_empty() {
            self.completion.base_url = default_completion_base_url();
        }
        if self.completion.model.is_empty() {
            self.completion.model = default_completion_model();
        }
        if self.cms.base_url.is_empty() {
            self.cms.base_url = default_cms_base_url();
        }
        if self.cms.image_url.is_empty() {
            self.cms.image_url = default_image_url();
        }
        if self.site.post_path_prefix.is_empty() {
            self.site.post_path_prefix = default_post_path_prefix();
        }
        if self.notification.from.is_empty() {
            self.notification.from = default_sender();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_locations()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Credentials required before a pipeline run may start
    pub fn require_credentials(&self) -> PipelineResult<RequiredCredentials> {
        let cms_api_key = present(&self.cms.api_key);
        let cms_collection_id = present(&self.cms.collection_id);
        let completion_api_key = present(&self.completion.api_key);

        let missing: Vec<&str> = [
            ("WEBFLOW_API_KEY", cms_api_key),
            ("WEBFLOW_COLLECTION_ID", cms_collection_id),
            ("OPENROUTER_API_KEY", completion_api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect();

        match (cms_api_key, cms_collection_id, completion_api_key) {
            (Some(cms_api_key), Some(cms_collection_id), Some(completion_api_key)) => {
                Ok(RequiredCredentials {
                    cms_api_key: cms_api_key.to_string(),
                    cms_collection_id: cms_collection_id.to_string(),
                    completion_api_key: completion_api_key.to_string(),
                })
            }
            _ => Err(WeatherBlogError::config(format!(
                "One or more required API keys are missing: {}",
                missing.join(", ")
            ))),
        }
    }

    fn validate_urls(&self) -> Result<()> {
        for (name, url) in [
            ("Weather API base URL", &self.weather.base_url),
            ("Completion API base URL", &self.completion.base_url),
            ("CMS API base URL", &self.cms.base_url),
            ("CMS image URL", &self.cms.image_url),
            ("Site base URL", &self.site.base_url),
            ("Resend API base URL", &self.notification.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherBlogError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        if let Some(endpoint) = self.logging.export_endpoint() {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(WeatherBlogError::config(
                    "OTLP endpoint must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_locations(&self) -> Result<()> {
        if self.locations.is_empty() {
            return Err(WeatherBlogError::config("At least one location must be configured").into());
        }

        if let Some(location) = self.locations.iter().find(|l| !l.has_valid_coordinates()) {
            return Err(WeatherBlogError::config(format!(
                "Location '{}' has invalid coordinates ({})",
                location.name,
                location.format_coordinates()
            ))
            .into());
        }

        if let Some(location) = self.locations.iter().find(|l| l.name.trim().is_empty()) {
            return Err(WeatherBlogError::config(format!(
                "Location at ({}) has no name",
                location.format_coordinates()
            ))
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherBlogError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherBlogError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.site.post_path_prefix.starts_with('/') {
            return Err(WeatherBlogError::config("Post path prefix must start with '/'").into());
        }

        Ok(())
    }
}
