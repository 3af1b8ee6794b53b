//! The five-stage publishing pipeline
//!
//! collect → render → generate → publish → notify, strictly in sequence.
//! The first failure in the first four stages ends the run; the notification
//! outcome never affects the result.

use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Span, field, info, instrument};

use crate::config::WeatherBlogConfig;
use crate::email::Notifier;
use crate::generator::ContentGenerator;
use crate::publisher::Publisher;
use crate::render::render_weather_table;
use crate::weather::WeatherClient;
use crate::{Result, WeatherBlogError};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub slug: String,
    pub url: String,
    pub item_id: Option<String>,
}

/// One pipeline definition wired to its external collaborators.
///
/// Holds no per-run state, so a single instance serves concurrent triggers.
pub struct Pipeline {
    config: Arc<WeatherBlogConfig>,
    weather: WeatherClient,
    generator: ContentGenerator,
    publisher: Publisher,
    notifier: Notifier,
}

impl Pipeline {
    /// Build every stage client from `config`, sharing one connection pool
    pub fn new(config: Arc<WeatherBlogConfig>) -> Result<Self> {
        let client = build_http_client(&config)?;

        Ok(Self {
            weather: WeatherClient::new(client.clone(), &config.weather),
            generator: ContentGenerator::new(client.clone(), &config.completion),
            publisher: Publisher::new(client.clone(), &config.cms),
            notifier: Notifier::from_config(client, &config.notification),
            config,
        })
    }

    /// Replace the notifier built from configuration
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn config(&self) -> &WeatherBlogConfig {
        &self.config
    }

    /// Execute one full run
    #[instrument(skip(self), fields(run_id = %Utc::now().format("%Y%m%dT%H%M%S%.3f"), slug = field::Empty))]
    pub async fn run(&self) -> Result<PipelineOutcome> {
        let start_time = Instant::now();

        let credentials = self.config.require_credentials()?;

        let records = self.weather.collect(&self.config.locations).await?;

        let table_html = render_weather_table(&records);

        let document = self
            .generator
            .generate(&credentials.completion_api_key, &table_html)
            .await?;

        let published = self
            .publisher
            .publish(
                &credentials.cms_api_key,
                &credentials.cms_collection_id,
                &document,
            )
            .await?;
        Span::current().record("slug", published.slug.as_str());

        let url = self.config.site.post_url(&published.slug);

        self.notifier.notify_published(&url).await;

        info!(
            %url,
            "Pipeline finished in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(PipelineOutcome {
            slug: published.slug,
            url,
            item_id: published.item_id,
        })
    }
}

fn build_http_client(config: &WeatherBlogConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.http.user_agent.clone());
    if let Some(seconds) = config.http.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    builder
        .build()
        .map_err(|e| WeatherBlogError::config(format!("Failed to create HTTP client: {e}")))
}
