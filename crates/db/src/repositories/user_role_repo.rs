//! Repository for `user_roles` and the `has_role` SQL function.

use marquee_core::roles::AppRole;
use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_role::UserRole;

const COLUMNS: &str = "id, user_id, role::text AS role, created_at";

pub struct UserRoleRepo;

impl UserRoleRepo {
    /// Call the `has_role` remote procedure.
    pub async fn has_role(pool: &PgPool, user_id: DbId, role: AppRole) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT has_role($1, $2::app_role)")
            .bind(user_id)
            .bind(role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Direct table lookup of one assignment: "at most one" semantics.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        role: AppRole,
    ) -> Result<Option<UserRole>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_roles WHERE user_id = $1 AND role = $2::app_role"
        );
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<UserRole>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM user_roles WHERE user_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Grant a role. Granting an existing role is a no-op that returns the
    /// existing assignment.
    pub async fn grant(pool: &PgPool, user_id: DbId, role: AppRole) -> Result<UserRole, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2::app_role)
             ON CONFLICT ON CONSTRAINT uq_user_roles_user_role DO UPDATE SET role = EXCLUDED.role
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Grant the admin role by email via the `grant_admin` SQL function.
    /// Returns `false` when no such account exists.
    pub async fn grant_admin_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT grant_admin($1)")
            .bind(email)
            .fetch_one(pool)
            .await
    }
}
