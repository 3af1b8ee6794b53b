//! Best-effort "post published" notifications
//!
//! Delivery goes through the Resend HTTP API or an SMTP relay. Nothing here
//! returns an error to the pipeline: failures are logged and dropped.

use anyhow::Context;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::SmtpTransport;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, Transport};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::config::{MailTransport, NotificationConfig};
use crate::{Result, WeatherBlogError};

pub const SUBJECT: &str = "New Weather Blog Post Published!";

/// A fully addressed HTML email
#[derive(Debug, Clone)]
pub struct Email {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub html: String,
}

impl Email {
    /// Notification pointing the recipient at a freshly published post
    pub fn post_published(from: &str, to: &str, post_url: &str) -> Result<Self> {
        let from = from.parse::<Mailbox>().map_err(|e| {
            WeatherBlogError::notification(format!("invalid sender address '{from}': {e}"))
        })?;
        let to = to.parse::<Mailbox>().map_err(|e| {
            WeatherBlogError::notification(format!("invalid recipient address '{to}': {e}"))
        })?;

        Ok(Self {
            from,
            to,
            subject: SUBJECT.to_string(),
            html: format!(
                "<p>Your automatic weather blog post has been published.</p>\n\
<p>View it here: <a href=\"{post_url}\">{post_url}</a></p>"
            ),
        })
    }
}

/// Something that can deliver an [`Email`]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: String,
    to: Vec<String>,
    subject: &'a str,
    html: &'a str,
}

/// Resend transactional email API
pub struct ResendMailer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ResendMailer {
    #[must_use]
    pub fn new(client: Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            api_key,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        let body = ResendRequest {
            from: email.from.to_string(),
            to: vec![email.to.to_string()],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| WeatherBlogError::notification(format!("Resend request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(%status, body = %text, "Resend API error");
            return Err(WeatherBlogError::notification(format!(
                "Resend API responded with {status}"
            )));
        }
        Ok(())
    }
}

/// SMTP relay with username/password authentication
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(relay: &str, username: String, password: String) -> anyhow::Result<Self> {
        let credentials = Credentials::new(username, password);

        let transport = SmtpTransport::relay(relay)
            .with_context(|| format!("Failed to configure SMTP relay {relay}"))?
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        let message = Message::builder()
            .from(email.from.clone())
            .to(email.to.clone())
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
            .map_err(|e| WeatherBlogError::notification(format!("failed to build email: {e}")))?;

        // lettre's SMTP transport is blocking
        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| WeatherBlogError::notification(format!("email task failed: {e}")))?
            .map_err(|e| WeatherBlogError::notification(format!("SMTP send failed: {e}")))?;
        Ok(())
    }
}

/// Sends the "post published" email when notifications are configured
pub struct Notifier {
    mailer: Option<Box<dyn Mailer>>,
    from: String,
    recipient: String,
}

impl Notifier {
    /// Build the notifier described by `config`, disabled when incomplete
    #[must_use]
    pub fn from_config(client: Client, config: &NotificationConfig) -> Self {
        let recipient = config.recipient.clone().unwrap_or_default();

        let mailer: Option<Box<dyn Mailer>> = if !config.is_enabled() {
            None
        } else {
            match config.transport {
                MailTransport::Resend => Some(Box::new(ResendMailer::new(
                    client,
                    &config.base_url,
                    config.api_key.clone().unwrap_or_default(),
                ))),
                MailTransport::Smtp => match SmtpMailer::new(
                    &config.smtp_relay,
                    config.smtp_username.clone().unwrap_or_default(),
                    config.smtp_password.clone().unwrap_or_default(),
                ) {
                    Ok(mailer) => Some(Box::new(mailer)),
                    Err(e) => {
                        error!("Email notifications disabled: {:#}", e);
                        None
                    }
                },
            }
        };

        Self {
            mailer,
            from: config.from.clone(),
            recipient,
        }
    }

    /// Notifier using an explicit mailer
    #[must_use]
    pub fn with_mailer(mailer: Box<dyn Mailer>, from: String, recipient: String) -> Self {
        Self {
            mailer: Some(mailer),
            from,
            recipient,
        }
    }

    /// Notifier that never sends anything
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            mailer: None,
            from: String::new(),
            recipient: String::new(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    /// Announce the post at `post_url`. Failures are logged, never returned.
    #[instrument(skip(self))]
    pub async fn notify_published(&self, post_url: &str) {
        let Some(mailer) = &self.mailer else {
            warn!("Email notifications are not configured; skipping");
            return;
        };

        let outcome = match Email::post_published(&self.from, &self.recipient, post_url) {
            Ok(email) => mailer.send(&email).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => info!("Sent publication email to {}", self.recipient),
            Err(e) => error!(stage = e.stage(), "Email notification failed: {}", e),
        }
    }
}
