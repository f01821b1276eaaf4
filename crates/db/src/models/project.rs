//! Project entity model and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub link_text: Option<String>,
    pub category: Option<String>,
    pub is_featured: bool,
    pub is_visible: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project. Visibility defaults to `true`, order to `0`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub link_text: Option<String>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub link_text: Option<String>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}
