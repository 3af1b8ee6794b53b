//! Parsing and validation of the model's JSON reply

use serde_json::{Map, Value};
use tracing::error;

use crate::models::BlogDocument;
use crate::{Result, WeatherBlogError};

/// Parse the completion text into a [`BlogDocument`].
///
/// Every key must be present and hold a non-empty string. `newsSchema` may
/// also be a JSON object, which is kept as its JSON text.
pub fn parse_blog_document(content: &str) -> Result<BlogDocument> {
    let json_text = strip_code_fence(content);

    let value: Value = serde_json::from_str(json_text).map_err(|e| {
        error!(raw = %content, "Failed to parse JSON from completion provider: {}", e);
        WeatherBlogError::generation("completion provider returned invalid JSON")
    })?;

    let Value::Object(object) = value else {
        error!(raw = %content, "Completion JSON is not an object");
        return Err(WeatherBlogError::generation(
            "completion provider returned JSON that is not an object",
        ));
    };

    Ok(BlogDocument {
        title: required_string(&object, "blogName")?,
        slug: required_string(&object, "slug")?,
        meta_title: required_string(&object, "metaTitle")?,
        meta_description: required_string(&object, "metaDescription")?,
        image_alt: required_string(&object, "imageAlt")?,
        body_html: required_string(&object, "postBody")?,
        news_schema: schema_text(&object)?,
    })
}

fn required_string(object: &Map<String, Value>, key: &str) -> Result<String> {
    match object.get(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.clone()),
        Some(Value::String(_)) => Err(WeatherBlogError::generation(format!(
            "field '{key}' is empty"
        ))),
        Some(other) => Err(WeatherBlogError::generation(format!(
            "field '{key}' must be a string, got {}",
            json_type(other)
        ))),
        None => Err(WeatherBlogError::generation(format!(
            "field '{key}' is missing"
        ))),
    }
}

fn schema_text(object: &Map<String, Value>) -> Result<String> {
    match object.get("newsSchema") {
        Some(schema @ Value::Object(_)) => serde_json::to_string(schema).map_err(|e| {
            WeatherBlogError::generation(format!("field 'newsSchema' is not serializable: {e}"))
        }),
        _ => required_string(object, "newsSchema"),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Drop a surrounding markdown code fence such as ```` ```json ... ``` ````
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // A fence on one line has no language tag to skip
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply() -> Value {
        json!({
            "blogName": "Winter Creeps Into the Plains",
            "slug": "ind-weather-nov-2025",
            "metaTitle": "India Weather Today: Cities Update",
            "metaDescription": "Fog in Delhi, humid Mumbai and showers in Chennai.",
            "imageAlt": "Live satellite weather map of India showing cloud cover",
            "postBody": "<h2>Weather Alert</h2><WEATHER_TABLE><h3>Stay Prepared</h3>",
            "newsSchema": "{\"@context\":\"https://schema.org\",\"@type\":\"NewsArticle\"}"
        })
    }

    #[test]
    fn test_parse_valid_document() {
        let doc = parse_blog_document(&reply().to_string()).unwrap();
        assert_eq!(doc.title, "Winter Creeps Into the Plains");
        assert_eq!(doc.slug, "ind-weather-nov-2025");
        assert!(doc.body_html.contains("<WEATHER_TABLE>"));
        assert!(doc.news_schema.contains("NewsArticle"));
    }

    #[test]
    fn test_invalid_json_is_generation_error() {
        let err = parse_blog_document("Sure! Here is your post: {not json").unwrap_err();
        assert!(matches!(err, WeatherBlogError::Generation { .. }));
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut value = reply();
        value.as_object_mut().unwrap().remove("metaDescription");
        let err = parse_blog_document(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("'metaDescription' is missing"));
    }

    #[test]
    fn test_wrong_type_and_empty_fields() {
        let mut value = reply();
        value["slug"] = json!(42);
        let err = parse_blog_document(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("'slug' must be a string, got number"));

        let mut value = reply();
        value["blogName"] = json!("  ");
        let err = parse_blog_document(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("'blogName' is empty"));
    }

    #[test]
    fn test_non_object_reply() {
        let err = parse_blog_document("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("not an object"));
    }

    #[test]
    fn test_schema_object_is_serialized() {
        let mut value = reply();
        value["newsSchema"] = json!({"@type": "NewsArticle", "headline": "Fog"});
        let doc = parse_blog_document(&value.to_string()).unwrap();
        let schema: Value = serde_json::from_str(&doc.news_schema).unwrap();
        assert_eq!(schema["headline"], "Fog");
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let fenced = format!("```json\n{}\n```", reply());
        let doc = parse_blog_document(&fenced).unwrap();
        assert_eq!(doc.slug, "ind-weather-nov-2025");

        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");

        let fenced = format!("```{}```", reply());
        let doc = parse_blog_document(&fenced).unwrap();
        assert_eq!(doc.slug, "ind-weather-nov-2025");
    }
}
