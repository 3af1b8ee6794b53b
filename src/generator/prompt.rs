//! Prompt template for the blog post request

use chrono::{FixedOffset, NaiveDate, Utc};

use crate::models::TABLE_PLACEHOLDER;

/// India Standard Time, UTC+05:30
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Calendar day in India, which is the day the report describes
#[must_use]
pub fn report_date() -> NaiveDate {
    let now = Utc::now();
    FixedOffset::east_opt(IST_OFFSET_SECS)
        .map_or_else(|| now.date_naive(), |ist| now.with_timezone(&ist).date_naive())
}

/// Build the instruction sent to the completion model.
///
/// The table is embedded between placeholder delimiters so the model can see
/// the data, while the body it returns must carry only the bare placeholder.
#[must_use]
pub fn build_prompt(table_html: &str, date: NaiveDate) -> String {
    let closing = TABLE_PLACEHOLDER.replacen('<', "</", 1);
    let date = date.format("%d %B %Y");

    format!(
        r#"You are an expert SEO content writer for an Indian audience, specializing in weather and agriculture.
Write a blog post about the current weather across India for {date}.

CRITICAL RULES:
- Never use the em dash character (—). Use a plain hyphen (-) or rephrase.
- The highest heading level in the post is H2. Do not use H1.
- The final heading in the post must be an H3.

The post must contain:
1. A weather alert section.
2. Lively, "chatpata" commentary on how this weather affects local farming and daily life.
3. The data table below.

This is the live weather table:
{TABLE_PLACEHOLDER}
{table_html}
{closing}

Reply with a single JSON object and nothing else. Use exactly these keys:
{{
  "blogName": "A catchy, short blog post title.",
  "slug": "An SEO-friendly slug, lowercase and hyphen-separated, e.g. 'indian-monsoon-update-nov-2025'.",
  "metaTitle": "SEO meta title, 30 to 45 characters.",
  "metaDescription": "SEO meta description, 120 to 145 characters.",
  "imageAlt": "SEO alt text for a live satellite weather map of India.",
  "postBody": "The full post as HTML. Start with an H2 heading, end with an H3 heading, include the literal {TABLE_PLACEHOLDER} placeholder exactly once where the table belongs, and never use em dashes.",
  "newsSchema": "A valid NewsArticle JSON-LD schema for this post, using https://your-site.com for URLs."
}}"#
    )
}
