//! Navigation link model and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `nav_links`. `name` is the label shown in the menu.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct NavLink {
    pub id: DbId,
    pub name: String,
    pub href: String,
    pub is_visible: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNavLink {
    pub name: String,
    pub href: String,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNavLink {
    pub name: Option<String>,
    pub href: Option<String>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}
