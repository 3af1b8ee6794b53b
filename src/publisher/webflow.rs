//! Webflow v2 collection-item wire types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::config::CmsFieldSlugs;
use crate::models::BlogDocument;

/// Body of `POST /collections/{id}/items`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub is_archived: bool,
    pub is_draft: bool,
    pub field_data: Map<String, Value>,
}

impl CreateItemRequest {
    /// Live (neither archived nor draft) item for `document`
    #[must_use]
    pub fn published(document: &BlogDocument, image_url: &str, fields: &CmsFieldSlugs) -> Self {
        let mut field_data = Map::new();
        field_data.insert("name".to_string(), json!(document.title));
        field_data.insert("slug".to_string(), json!(document.slug));
        field_data.insert(
            fields.image.clone(),
            json!({ "url": image_url, "alt": document.image_alt }),
        );
        field_data.insert(fields.meta_title.clone(), json!(document.meta_title));
        field_data.insert(fields.meta_description.clone(), json!(document.meta_description));
        field_data.insert(fields.body.clone(), json!(document.body_html));
        field_data.insert(fields.schema.clone(), json!(document.news_schema));

        Self {
            is_archived: false,
            is_draft: false,
            field_data,
        }
    }
}

/// The parts of a created item the pipeline reads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedItem {
    pub id: Option<String>,
    pub field_data: Option<CreatedFieldData>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedFieldData {
    pub slug: Option<String>,
}

/// Webflow error body
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> BlogDocument {
        BlogDocument {
            title: "Fog Over Delhi".to_string(),
            slug: "ind-weather-nov-2025".to_string(),
            meta_title: "India Weather Today".to_string(),
            meta_description: "Weather across India".to_string(),
            image_alt: "Satellite map".to_string(),
            body_html: "<h2>Alert</h2><table></table><h3>End</h3>".to_string(),
            news_schema: "{\"@type\":\"NewsArticle\"}".to_string(),
        }
    }

    #[test]
    fn test_payload_field_mapping() {
        let request = CreateItemRequest::published(
            &document(),
            "https://mausam.imd.gov.in/sat.jpg",
            &CmsFieldSlugs::default(),
        );
        let payload = serde_json::to_value(&request).unwrap();

        assert_eq!(payload["isArchived"], false);
        assert_eq!(payload["isDraft"], false);
        let fields = &payload["fieldData"];
        assert_eq!(fields["name"], "Fog Over Delhi");
        assert_eq!(fields["slug"], "ind-weather-nov-2025");
        assert_eq!(fields["main-image"]["url"], "https://mausam.imd.gov.in/sat.jpg");
        assert_eq!(fields["main-image"]["alt"], "Satellite map");
        assert_eq!(fields["meta-title"], "India Weather Today");
        assert_eq!(fields["meta-description"], "Weather across India");
        assert_eq!(fields["post-body"], "<h2>Alert</h2><table></table><h3>End</h3>");
        assert_eq!(fields["schema"], "{\"@type\":\"NewsArticle\"}");
    }

    #[test]
    fn test_custom_field_slugs() {
        let slugs = CmsFieldSlugs {
            body: "content".to_string(),
            ..CmsFieldSlugs::default()
        };
        let request = CreateItemRequest::published(&document(), "https://img", &slugs);
        assert!(request.field_data.contains_key("content"));
        assert!(!request.field_data.contains_key("post-body"));
    }
}
