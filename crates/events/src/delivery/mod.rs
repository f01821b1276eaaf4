//! Contact-form notification delivery.
//!
//! The contact endpoint stores a submission first and then asks the
//! configured [`ContactNotifier`] to e-mail it. Which channel is used is
//! decided once from the environment: the HTTP email API when
//! `EMAIL_API_KEY` is set, else SMTP when `SMTP_HOST` is set, else none.

pub mod email;
pub mod email_api;

use marquee_core::contact::ContactMessage;

use self::email::{SmtpConfig, SmtpDelivery};
use self::email_api::{EmailApiConfig, EmailApiDelivery};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for notification delivery failures on either channel.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The email API request failed (network, DNS, timeout, etc.).
    #[error("Email API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The email API returned a non-2xx status code.
    #[error("Email API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// ContactNotifier
// ---------------------------------------------------------------------------

/// The configured notification channel.
pub enum ContactNotifier {
    Smtp(SmtpDelivery),
    EmailApi(EmailApiDelivery),
    Disabled,
}

impl ContactNotifier {
    /// Pick a channel from environment variables.
    pub fn from_env() -> Result<Self, EmailError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Pick a channel using `lookup` to read configuration values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EmailError> {
        if let Some(config) = EmailApiConfig::from_lookup(&lookup) {
            return Ok(ContactNotifier::EmailApi(EmailApiDelivery::new(config)?));
        }
        if let Some(config) = SmtpConfig::from_lookup(&lookup) {
            return Ok(ContactNotifier::Smtp(SmtpDelivery::new(config)?));
        }
        Ok(ContactNotifier::Disabled)
    }

    pub fn channel(&self) -> &'static str {
        match self {
            ContactNotifier::Smtp(_) => "smtp",
            ContactNotifier::EmailApi(_) => "email_api",
            ContactNotifier::Disabled => "disabled",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, ContactNotifier::Disabled)
    }

    /// Send the notification for a submission to `recipient`.
    ///
    /// Returns `Ok(false)` without doing anything when no channel is
    /// configured, `Ok(true)` once the message was handed off.
    pub async fn notify(&self, recipient: &str, message: &ContactMessage) -> Result<bool, EmailError> {
        match self {
            ContactNotifier::Smtp(smtp) => smtp.deliver(recipient, message).await.map(|()| true),
            ContactNotifier::EmailApi(api) => api.deliver(recipient, message).await.map(|()| true),
            ContactNotifier::Disabled => Ok(false),
        }
    }
}

impl std::fmt::Debug for ContactNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ContactNotifier").field(&self.channel()).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
