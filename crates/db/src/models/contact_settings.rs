//! Contact section singleton.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Contact copy, social links and the address that receives form
/// submissions.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ContactSettings {
    pub id: DbId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub management_email: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub twitter_url: Option<String>,
    pub youtube_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertContactSettings {
    #[serde(default)]
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub management_email: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub twitter_url: Option<String>,
    pub youtube_url: Option<String>,
}
