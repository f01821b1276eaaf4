//! Role assignments.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `user_roles`. `role` is read as text (`role::text`) so the
/// row decodes without a custom Postgres enum mapping.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UserRole {
    pub id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}
