//! Repository for the `archive_items` table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::archive::{ArchiveItem, CreateArchiveItem, UpdateArchiveItem};

const COLUMNS: &str = "id, category_id, title, description, image_url, link_url, item_date, \
                       is_visible, sort_order, created_at, updated_at";

pub struct ArchiveItemRepo;

impl ArchiveItemRepo {
    /// Visible items of one category in display order.
    pub async fn list_visible_for_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<ArchiveItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM archive_items
             WHERE category_id = $1 AND is_visible = true
             ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, ArchiveItem>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Every item, optionally restricted to one category.
    pub async fn list_all(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<ArchiveItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM archive_items
             WHERE ($1::uuid IS NULL OR category_id = $1)
             ORDER BY category_id, sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, ArchiveItem>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateArchiveItem) -> Result<ArchiveItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO archive_items
                (category_id, title, description, image_url, link_url, item_date, is_visible, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, true), COALESCE($8, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArchiveItem>(&query)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(input.item_date)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArchiveItem,
    ) -> Result<Option<ArchiveItem>, sqlx::Error> {
        let query = format!(
            "UPDATE archive_items SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                image_url = COALESCE($5, image_url),
                link_url = COALESCE($6, link_url),
                item_date = COALESCE($7, item_date),
                is_visible = COALESCE($8, is_visible),
                sort_order = COALESCE($9, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArchiveItem>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(input.item_date)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM archive_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
