//! Chat-completion client for OpenRouter's OpenAI-compatible API

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::config::CompletionConfig;
use crate::{Result, WeatherBlogError};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for a single-turn chat completion
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl CompletionClient {
    #[must_use]
    pub fn new(client: Client, config: &CompletionConfig) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        }
    }

    /// Model identifier sent with every request
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` as the only user message and return the reply text
    #[instrument(skip(self, api_key, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn complete(&self, api_key: &str, prompt: &str) -> Result<String> {
        let start_time = Instant::now();
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Completion request failed: {}", e);
                WeatherBlogError::generation(format!("completion request failed: {e}"))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            WeatherBlogError::generation(format!("failed to read completion response: {e}"))
        })?;

        if !status.is_success() {
            error!(%status, body = %text, "Completion API returned an error");
            return Err(WeatherBlogError::generation(format!(
                "completion API error: {status}"
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            error!(body = %text, "Failed to parse completion response: {}", e);
            WeatherBlogError::generation(format!("malformed completion response: {e}"))
        })?;

        if let Some(api_error) = parsed.error {
            error!(body = %text, "Completion API reported an error");
            return Err(WeatherBlogError::generation(format!(
                "completion API error: {}",
                api_error.message
            )));
        }

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                error!(body = %text, "Completion response has no message content");
                WeatherBlogError::generation("completion response has no message content")
            })?;

        let elapsed = start_time.elapsed();
        info!(
            "Received {} characters from the completion API in {:.3}s",
            content.len(),
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 45 {
            warn!("Slow completion response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(content)
    }
}
