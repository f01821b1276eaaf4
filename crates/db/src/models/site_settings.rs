//! Site settings singleton.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of `site_settings`: branding and hero copy.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SiteSettings {
    pub id: DbId,
    pub site_name: String,
    pub site_tagline: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub hero_background_gradient: Option<String>,
    pub privacy_policy: Option<String>,
    pub terms_of_service: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full replacement body for the singleton.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertSiteSettings {
    #[serde(default)]
    pub site_name: String,
    pub site_tagline: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub hero_background_gradient: Option<String>,
    pub privacy_policy: Option<String>,
    pub terms_of_service: Option<String>,
}
