//! Video entity model and DTOs.
//!
//! `youtube_embed_id` is never supplied by callers; the repository derives it
//! from `youtube_url` on every write.

use marquee_core::types::{DbId, Timestamp};
use marquee_core::video;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub youtube_url: Option<String>,
    pub youtube_embed_id: Option<String>,
    pub thumbnail_url: Option<String>,
    pub watermark_url: Option<String>,
    pub duration: Option<String>,
    pub views: Option<String>,
    pub is_featured: bool,
    pub is_visible: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Video {
    /// Explicit thumbnail, else the YouTube-hosted one for the embed id.
    pub fn effective_thumbnail(&self) -> Option<String> {
        self.thumbnail_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.youtube_embed_id.as_deref().map(video::thumbnail_url))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub youtube_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub watermark_url: Option<String>,
    pub duration: Option<String>,
    pub views: Option<String>,
    pub is_featured: Option<bool>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub youtube_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub watermark_url: Option<String>,
    pub duration: Option<String>,
    pub views: Option<String>,
    pub is_featured: Option<bool>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}
