//! Contact notifications via SMTP.
//!
//! [`SmtpDelivery`] wraps the `lettre` async SMTP transport (STARTTLS relay)
//! and sends a plain-text + HTML alternative message. Configuration is loaded
//! from environment variables; without `SMTP_HOST`, [`SmtpConfig::from_env`]
//! returns `None` and no mailer should be constructed.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use marquee_core::contact::ContactMessage;

use super::EmailError;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@marquee.local";

/// Configuration for SMTP delivery.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl SmtpConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                  |
    /// |-----------------|----------|--------------------------|
    /// | `SMTP_HOST`     | yes      | -                        |
    /// | `SMTP_PORT`     | no       | `587`                    |
    /// | `SMTP_FROM`     | no       | `noreply@marquee.local`  |
    /// | `SMTP_USER`     | no       | -                        |
    /// | `SMTP_PASSWORD` | no       | -                        |
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let smtp_host = lookup("SMTP_HOST").filter(|h| !h.trim().is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: lookup("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: lookup("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: lookup("SMTP_USER"),
            smtp_password: lookup("SMTP_PASSWORD"),
        })
    }
}

/// Sends contact notifications through an SMTP relay.
pub struct SmtpDelivery {
    config: SmtpConfig,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpDelivery {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: SmtpConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
            config,
        })
    }

    /// Send the notification for `message` to `to_email`. Replies go to the
    /// person who filled in the form.
    pub async fn deliver(&self, to_email: &str, message: &ContactMessage) -> Result<(), EmailError> {
        let email = build_message(&self.config.from_address, to_email, message)?;
        self.mailer.send(email).await?;

        tracing::info!(to = to_email, "Contact notification sent via SMTP");
        Ok(())
    }
}

fn build_message(from: &str, to: &str, message: &ContactMessage) -> Result<Message, EmailError> {
    let reply_to = Mailbox::new(Some(message.name.clone()), message.email.parse::<Address>()?);

    Message::builder()
        .from(from.parse()?)
        .to(to.parse()?)
        .reply_to(reply_to)
        .subject(message.subject_line())
        .multipart(MultiPart::alternative_plain_html(
            message.text_body(),
            message.html_body(),
        ))
        .map_err(|e| EmailError::Build(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Jo Fan".to_string(),
            email: "jo@example.com".to_string(),
            subject: Some("Booking".to_string()),
            message: "Line one\nLine two".to_string(),
        }
    }

    #[test]
    fn from_lookup_returns_none_without_smtp_host() {
        assert!(SmtpConfig::from_lookup(|_| None).is_none());
    }

    #[test]
    fn from_lookup_applies_defaults() {
        let config = SmtpConfig::from_lookup(|key| match key {
            "SMTP_HOST" => Some("smtp.example.com".to_string()),
            "SMTP_PORT" => Some("not-a-port".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.smtp_port, DEFAULT_SMTP_PORT);
        assert_eq!(config.from_address, DEFAULT_FROM_ADDRESS);
        assert!(config.smtp_user.is_none());
    }

    #[test]
    fn message_carries_subject_and_reply_to() {
        let email = build_message("noreply@marquee.local", "admin@example.com", &message()).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("Subject: Contact Form: Booking"));
        assert!(raw.contains("Reply-To:"));
        assert!(raw.contains("jo@example.com"));
    }

    #[test]
    fn invalid_recipient_is_an_address_error() {
        let err = build_message("noreply@marquee.local", "not-an-email", &message()).unwrap_err();
        assert!(err.to_string().contains("Email address parse error"));
    }
}
