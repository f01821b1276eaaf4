//! Contact notifications via a transactional email HTTP API.
//!
//! Posts `{from, to, subject, html, text, reply_to}` as JSON with a bearer
//! key, the request shape used by Resend-style APIs.

use std::time::Duration;

use marquee_core::contact::ContactMessage;
use serde::Serialize;

use super::EmailError;

/// Default endpoint when `EMAIL_API_URL` is not set.
const DEFAULT_API_URL: &str = "https://api.resend.com/emails";

/// Default sender when `EMAIL_FROM` is not set.
const DEFAULT_FROM: &str = "Contact Form <onboarding@resend.dev>";

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct EmailApiConfig {
    pub api_key: String,
    pub api_url: String,
    pub from: String,
}

impl EmailApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                               |
    /// |-----------------|----------|---------------------------------------|
    /// | `EMAIL_API_KEY` | yes      | -                                     |
    /// | `EMAIL_API_URL` | no       | `https://api.resend.com/emails`       |
    /// | `EMAIL_FROM`    | no       | `Contact Form <onboarding@resend.dev>`|
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup("EMAIL_API_KEY").filter(|k| !k.trim().is_empty())?;
        Some(Self {
            api_key,
            api_url: lookup("EMAIL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            from: lookup("EMAIL_FROM").unwrap_or_else(|| DEFAULT_FROM.to_string()),
        })
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
    text: String,
    reply_to: &'a str,
}

/// Sends contact notifications through the email API.
pub struct EmailApiDelivery {
    config: EmailApiConfig,
    client: reqwest::Client,
}

impl EmailApiDelivery {
    pub fn new(config: EmailApiConfig) -> Result<Self, EmailError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    pub async fn deliver(&self, to_email: &str, message: &ContactMessage) -> Result<(), EmailError> {
        let request = SendRequest {
            from: &self.config.from,
            to: [to_email],
            subject: message.subject_line(),
            html: message.html_body(),
            text: message.text_body(),
            reply_to: &message.email,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = to_email, "Contact notification sent via email API");
        Ok(())
    }
}
