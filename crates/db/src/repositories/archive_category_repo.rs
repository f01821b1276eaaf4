//! Repository for the `archive_categories` table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::archive::{ArchiveCategory, CreateArchiveCategory, UpdateArchiveCategory};

const COLUMNS: &str = "id, title, slug, description, cover_image_url, link_url, year, \
                       is_visible, sort_order, created_at, updated_at";

pub struct ArchiveCategoryRepo;

impl ArchiveCategoryRepo {
    pub async fn list_visible(pool: &PgPool) -> Result<Vec<ArchiveCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM archive_categories WHERE is_visible = true
             ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, ArchiveCategory>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<ArchiveCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM archive_categories ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, ArchiveCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a visible category by slug. Hidden categories read as absent.
    pub async fn find_visible_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ArchiveCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM archive_categories WHERE slug = $1 AND is_visible = true"
        );
        sqlx::query_as::<_, ArchiveCategory>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert a category under an already-resolved slug.
    ///
    /// A duplicate slug fails with a unique violation on
    /// `uq_archive_categories_slug`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateArchiveCategory,
        slug: &str,
    ) -> Result<ArchiveCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO archive_categories
                (title, slug, description, cover_image_url, link_url, year, is_visible, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, true), COALESCE($8, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArchiveCategory>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.cover_image_url)
            .bind(&input.link_url)
            .bind(&input.year)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Update a category. `input.slug`, when present, must already be
    /// normalized.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArchiveCategory,
    ) -> Result<Option<ArchiveCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE archive_categories SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                cover_image_url = COALESCE($5, cover_image_url),
                link_url = COALESCE($6, link_url),
                year = COALESCE($7, year),
                is_visible = COALESCE($8, is_visible),
                sort_order = COALESCE($9, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArchiveCategory>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.cover_image_url)
            .bind(&input.link_url)
            .bind(&input.year)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category and, by cascade, its items.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM archive_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
