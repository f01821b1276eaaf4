//! Archive categories and the items filed under them.

use chrono::NaiveDate;
use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `archive_categories`. `slug` is unique and URL-safe.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ArchiveCategory {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub link_url: Option<String>,
    pub year: Option<String>,
    pub is_visible: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category. A missing or blank `slug` is derived from
/// the title before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArchiveCategory {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub link_url: Option<String>,
    pub year: Option<String>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArchiveCategory {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub link_url: Option<String>,
    pub year: Option<String>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}

/// A row from `archive_items`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ArchiveItem {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub item_date: Option<NaiveDate>,
    pub is_visible: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateArchiveItem {
    pub category_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub item_date: Option<NaiveDate>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArchiveItem {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub item_date: Option<NaiveDate>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}
