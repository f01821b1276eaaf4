//! Footer singleton.

use chrono::Datelike;
use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Placeholder in `copyright_text` replaced with the current year.
pub const YEAR_PLACEHOLDER: &str = "{year}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct FooterSettings {
    pub id: DbId,
    pub copyright_text: String,
    pub show_social_links: bool,
    pub additional_links: Json<Vec<FooterLink>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FooterSettings {
    /// The copyright line with `{year}` expanded for the given instant.
    pub fn copyright_for(&self, now: Timestamp) -> String {
        self.copyright_text
            .replace(YEAR_PLACEHOLDER, &now.year().to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertFooterSettings {
    #[serde(default)]
    pub copyright_text: String,
    #[serde(default = "default_show_social_links")]
    pub show_social_links: bool,
    #[serde(default)]
    pub additional_links: Vec<FooterLink>,
}

fn default_show_social_links() -> bool {
    true
}
