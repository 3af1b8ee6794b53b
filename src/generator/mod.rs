//! Content generator
//!
//! Asks the completion model for a full SEO blog post around the rendered
//! weather table, validates the reply and splices the real table into the
//! body in place of the placeholder token.

use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::Result;
use crate::config::CompletionConfig;
use crate::models::BlogDocument;

pub mod document;
pub mod openrouter;
pub mod prompt;

pub use document::parse_blog_document;
pub use openrouter::CompletionClient;

/// Turns a rendered table into a publishable [`BlogDocument`]
#[derive(Debug, Clone)]
pub struct ContentGenerator {
    completion: CompletionClient,
}

impl ContentGenerator {
    #[must_use]
    pub fn new(client: Client, config: &CompletionConfig) -> Self {
        Self {
            completion: CompletionClient::new(client, config),
        }
    }

    #[instrument(skip_all, fields(model = %self.completion.model()))]
    pub async fn generate(&self, api_key: &str, table_html: &str) -> Result<BlogDocument> {
        let prompt = prompt::build_prompt(table_html, prompt::report_date());

        let content = self.completion.complete(api_key, &prompt).await?;

        let mut document = parse_blog_document(&content)?;
        document.insert_table(table_html)?;

        for issue in document.lint() {
            warn!(slug = %document.slug, "Generated post: {}", issue);
        }

        info!(slug = %document.slug, title = %document.title, "Blog post generated");
        Ok(document)
    }
}
