//! Blog post document produced by the content generator

use crate::{Result, WeatherBlogError};

/// Token the generated body carries until the real table is spliced in
pub const TABLE_PLACEHOLDER: &str = "<WEATHER_TABLE>";

/// A complete SEO blog post ready for publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDocument {
    pub title: String,
    pub slug: String,
    pub meta_title: String,
    pub meta_description: String,
    pub image_alt: String,
    pub body_html: String,
    /// NewsArticle JSON-LD, kept as JSON text
    pub news_schema: String,
}

impl BlogDocument {
    /// Replace the first placeholder token in the body with `table_html`.
    ///
    /// Fails when the body has no placeholder, since the post would ship
    /// without its data table.
    pub fn insert_table(&mut self, table_html: &str) -> Result<()> {
        if !self.body_html.contains(TABLE_PLACEHOLDER) {
            return Err(WeatherBlogError::generation(format!(
                "postBody does not contain the {TABLE_PLACEHOLDER} placeholder"
            )));
        }
        self.body_html = self.body_html.replacen(TABLE_PLACEHOLDER, table_html, 1);
        Ok(())
    }

    /// Formatting rules the body should follow but that are not worth failing
    /// a run over. Returns one line per violation.
    #[must_use]
    pub fn lint(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let body = self.body_html.trim().to_ascii_lowercase();

        if self.body_html.contains('\u{2014}') {
            issues.push("body contains an em dash".to_string());
        }
        if !body.starts_with("<h2") {
            issues.push("body does not start with an <h2> heading".to_string());
        }
        if heading_levels(&body).any(|level| level == 1) {
            issues.push("body contains an <h1> heading".to_string());
        }
        match heading_levels(&body).last() {
            Some(3) => {}
            Some(level) => issues.push(format!("last heading is <h{level}>, expected <h3>")),
            None => issues.push("body has no headings".to_string()),
        }
        issues
    }
}

/// Levels of the opening heading tags in `html`, in document order
fn heading_levels(html: &str) -> impl Iterator<Item = u32> + '_ {
    html.match_indices("<h").filter_map(|(index, _)| {
        html[index + 2..]
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .filter(|level| (1..=6).contains(level))
    })
}
