//! Repository for the `nav_links` table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::nav_link::{CreateNavLink, NavLink, UpdateNavLink};

const COLUMNS: &str = "id, name, href, is_visible, sort_order, created_at, updated_at";

pub struct NavLinkRepo;

impl NavLinkRepo {
    pub async fn list_visible(pool: &PgPool) -> Result<Vec<NavLink>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM nav_links WHERE is_visible = true
             ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, NavLink>(&query).fetch_all(pool).await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<NavLink>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM nav_links ORDER BY sort_order ASC, created_at ASC");
        sqlx::query_as::<_, NavLink>(&query).fetch_all(pool).await
    }

    pub async fn create(pool: &PgPool, input: &CreateNavLink) -> Result<NavLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO nav_links (name, href, is_visible, sort_order)
             VALUES ($1, $2, COALESCE($3, true), COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NavLink>(&query)
            .bind(&input.name)
            .bind(&input.href)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNavLink,
    ) -> Result<Option<NavLink>, sqlx::Error> {
        let query = format!(
            "UPDATE nav_links SET
                name = COALESCE($2, name),
                href = COALESCE($3, href),
                is_visible = COALESCE($4, is_visible),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NavLink>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.href)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM nav_links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
