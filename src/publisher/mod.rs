//! Publisher for the Webflow CMS
//!
//! Creates one live collection item per run and reports the slug Webflow
//! assigned to it.

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::{error, info, instrument};

use crate::config::{CmsConfig, CmsFieldSlugs};
use crate::models::BlogDocument;
use crate::{Result, WeatherBlogError};

pub mod webflow;

use webflow::{CreateItemRequest, CreatedItem, ErrorResponse};

/// Identity of a newly created CMS item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub item_id: Option<String>,
    pub slug: String,
}

/// Webflow collection-items client
#[derive(Debug, Clone)]
pub struct Publisher {
    client: Client,
    base_url: String,
    image_url: String,
    fields: CmsFieldSlugs,
}

impl Publisher {
    #[must_use]
    pub fn new(client: Client, config: &CmsConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_url: config.image_url.clone(),
            fields: config.fields.clone(),
        }
    }

    /// Create the post as a live item in `collection_id`
    #[instrument(skip(self, api_key, document), fields(slug = %document.slug))]
    pub async fn publish(
        &self,
        api_key: &str,
        collection_id: &str,
        document: &BlogDocument,
    ) -> Result<PublishResult> {
        let url = format!(
            "{}/collections/{}/items",
            self.base_url,
            urlencoding::encode(collection_id)
        );
        let body = CreateItemRequest::published(document, &self.image_url, &self.fields);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Webflow request failed: {}", e);
                WeatherBlogError::publish(format!("Webflow request failed: {e}"))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            WeatherBlogError::publish(format!("failed to read Webflow response: {e}"))
        })?;

        if !status.is_success() {
            error!(%status, body = %text, "Webflow API error");
            let detail = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|e| e.message.or(e.code))
                .unwrap_or_else(|| status.to_string());
            return Err(WeatherBlogError::publish(format!(
                "Webflow API error: {detail}"
            )));
        }

        let item: CreatedItem = serde_json::from_str(&text).map_err(|e| {
            error!(body = %text, "Failed to parse Webflow response: {}", e);
            WeatherBlogError::publish(format!("malformed Webflow response: {e}"))
        })?;

        let slug = item
            .field_data
            .and_then(|fields| fields.slug)
            .filter(|slug| !slug.is_empty())
            .ok_or_else(|| {
                error!(body = %text, "Webflow response has no slug");
                WeatherBlogError::publish("Webflow response did not include the item slug")
            })?;

        info!(item_id = ?item.id, %slug, "Published collection item");
        Ok(PublishResult {
            item_id: item.id,
            slug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn document() -> BlogDocument {
        BlogDocument {
            title: "Fog Over Delhi".to_string(),
            slug: "ind-weather-nov-2025".to_string(),
            meta_title: "India Weather Today".to_string(),
            meta_description: "Weather across India".to_string(),
            image_alt: "Satellite map".to_string(),
            body_html: "<h2>Alert</h2><table></table><h3>End</h3>".to_string(),
            news_schema: "{}".to_string(),
        }
    }

    fn publisher_for(server: &MockServer) -> Publisher {
        let config = CmsConfig {
            base_url: format!("{}/v2", server.uri()),
            ..CmsConfig::default()
        };
        Publisher::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn test_publish_returns_assigned_slug() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/collections/coll-42/items"))
            .and(header("authorization", "Bearer wf-token"))
            .and(body_partial_json(json!({
                "isDraft": false,
                "fieldData": {"slug": "ind-weather-nov-2025"}
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "id": "item-1",
                "isDraft": false,
                "fieldData": {"name": "Fog Over Delhi", "slug": "ind-weather-nov-2025-2"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = publisher_for(&server)
            .publish("wf-token", "coll-42", &document())
            .await
            .unwrap();

        assert_eq!(result.slug, "ind-weather-nov-2025-2");
        assert_eq!(result.item_id.as_deref(), Some("item-1"));
    }

    #[tokio::test]
    async fn test_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": "validation_error",
                "message": "slug already exists"
            })))
            .mount(&server)
            .await;

        let err = publisher_for(&server)
            .publish("wf-token", "coll-42", &document())
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherBlogError::Publish { .. }));
        assert!(err.to_string().contains("slug already exists"));
    }

    #[tokio::test]
    async fn test_unparseable_error_body_uses_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = publisher_for(&server)
            .publish("wf-token", "coll-42", &document())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_missing_slug_in_success_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "item-1"})))
            .mount(&server)
            .await;

        let err = publisher_for(&server)
            .publish("wf-token", "coll-42", &document())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("slug"));
    }
}
