//! Public contact form: request validation and notification rendering.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::allow_list::AdminAllowList;
use crate::error::CoreError;

/// Body of `POST /api/v1/contact`.
///
/// Required fields default to empty so that a missing field surfaces as a
/// validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    /// Overrides the configured recipient for this submission.
    #[validate(email)]
    pub recipient_email: Option<String>,
}

impl ContactRequest {
    /// Trim every field and turn blank optional fields into `None`.
    pub fn normalized(self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: blank_to_none(self.subject),
            message: self.message.trim().to_string(),
            recipient_email: blank_to_none(self.recipient_email),
        }
    }

    /// Validate the (normalised) request, naming the offending fields.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errors| {
            CoreError::invalid_fields("contact", errors.field_errors().keys().map(|k| k.to_string()))
        })
    }

    pub fn message(&self) -> ContactMessage {
        ContactMessage {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        }
    }
}

/// The content of a contact notification e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactMessage {
    pub fn subject_line(&self) -> String {
        match &self.subject {
            Some(subject) => format!("Contact Form: {subject}"),
            None => "New Contact Form Submission".to_string(),
        }
    }

    pub fn html_body(&self) -> String {
        let mut body = String::from("<h2>New Contact Form Submission</h2>\n");
        body.push_str(&format!(
            "<p><strong>From:</strong> {} ({})</p>\n",
            escape_html(&self.name),
            escape_html(&self.email)
        ));
        if let Some(subject) = &self.subject {
            body.push_str(&format!(
                "<p><strong>Subject:</strong> {}</p>\n",
                escape_html(subject)
            ));
        }
        body.push_str("<p><strong>Message:</strong></p>\n");
        body.push_str(&format!(
            "<p>{}</p>\n",
            escape_html(&self.message).replace('\n', "<br>")
        ));
        body
    }

    pub fn text_body(&self) -> String {
        let mut body = format!("From: {} ({})\n", self.name, self.email);
        if let Some(subject) = &self.subject {
            body.push_str(&format!("Subject: {subject}\n"));
        }
        body.push('\n');
        body.push_str(&self.message);
        body
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Choose where a contact notification goes.
///
/// A requested address is only honoured when it is already known to the
/// site: the management email, the fallback, or an allow-listed admin. The
/// public form never relays to anything else. Without a usable request the
/// management email wins, then the fallback.
pub fn resolve_recipient(
    requested: Option<&str>,
    management: Option<&str>,
    fallback: &str,
    admins: &AdminAllowList,
) -> String {
    let known = |addr: &str| {
        management.is_some_and(|m| m.eq_ignore_ascii_case(addr))
            || fallback.eq_ignore_ascii_case(addr)
            || admins.contains(addr)
    };
    match requested {
        Some(addr) if known(addr) => addr.to_string(),
        _ => management.unwrap_or(fallback).to_string(),
    }
}
