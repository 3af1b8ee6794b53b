//! Observation collector backed by the Open-Meteo forecast API
//!
//! Queries the current conditions for every configured location and turns
//! them into display-ready [`ObservationRecord`]s. Any failing location fails
//! the whole collection; there is no partial result.

use futures::future::try_join_all;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::config::WeatherConfig;
use crate::models::{LocationSpec, ObservationRecord};
use crate::{Result, WeatherBlogError};

pub mod open_meteo;

/// Weather API client for Open-Meteo
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a client that shares the given HTTP connection pool
    #[must_use]
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Collect one observation per location, preserving input order.
    ///
    /// Requests run concurrently; the first failure aborts the collection.
    #[instrument(skip_all, fields(locations = locations.len()))]
    pub async fn collect(&self, locations: &[LocationSpec]) -> Result<Vec<ObservationRecord>> {
        let start_time = Instant::now();

        let records = try_join_all(locations.iter().map(|l| self.current_observation(l))).await?;

        info!(
            "Collected {} observations in {:.3}s",
            records.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(records)
    }

    /// Get the current conditions for a single location
    #[instrument(skip(self, location), fields(city = %location.name))]
    pub async fn current_observation(&self, location: &LocationSpec) -> Result<ObservationRecord> {
        let url = open_meteo::current_conditions_url(
            &self.base_url,
            location.latitude,
            location.longitude,
        );
        debug!("OpenMeteo API request URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Weather request failed: {}", e);
            WeatherBlogError::collection(format!("{}: request failed: {e}", location.name))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            WeatherBlogError::collection(format!("{}: failed to read response: {e}", location.name))
        })?;

        if !status.is_success() {
            error!(%status, body = %body, "Weather API returned an error");
            return Err(WeatherBlogError::collection(format!(
                "{}: weather API responded with {status}",
                location.name
            )));
        }

        let parsed: open_meteo::CurrentResponse = serde_json::from_str(&body).map_err(|e| {
            error!(body = %body, "Failed to parse weather response: {}", e);
            WeatherBlogError::collection(format!(
                "{}: invalid weather data received: {e}",
                location.name
            ))
        })?;

        let current = parsed.current.ok_or_else(|| {
            error!(body = %body, "Weather response has no current block");
            WeatherBlogError::collection(format!(
                "{}: no current weather data available",
                location.name
            ))
        })?;

        debug!(observed_at = ?current.time, "Current conditions received");
        Ok(current.into_record(&location.name))
    }
}
