//! About section singleton.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// One headline figure in the about section, e.g. `{"value": "10M+", "label": "Views"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutStat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct AboutSection {
    pub id: DbId,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub stats: Json<Vec<AboutStat>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertAboutSection {
    #[serde(default)]
    pub title: String,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub stats: Vec<AboutStat>,
}
