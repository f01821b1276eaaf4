//! Repository for the `videos` table.

use marquee_core::types::DbId;
use marquee_core::video::extract_youtube_id;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, UpdateVideo, Video};

const COLUMNS: &str = "id, title, youtube_url, youtube_embed_id, thumbnail_url, watermark_url, \
                       duration, views, is_featured, is_visible, sort_order, created_at, updated_at";

pub struct VideoRepo;

impl VideoRepo {
    /// Visible videos in display order.
    pub async fn list_visible(pool: &PgPool) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos WHERE is_visible = true
             ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Video>(&query).fetch_all(pool).await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos ORDER BY sort_order ASC, created_at ASC");
        sqlx::query_as::<_, Video>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a video. The embed id is derived from `youtube_url`.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let embed_id = input.youtube_url.as_deref().and_then(extract_youtube_id);
        let query = format!(
            "INSERT INTO videos
                (title, youtube_url, youtube_embed_id, thumbnail_url, watermark_url,
                 duration, views, is_featured, is_visible, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, false), COALESCE($9, true), COALESCE($10, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.youtube_url)
            .bind(embed_id)
            .bind(&input.thumbnail_url)
            .bind(&input.watermark_url)
            .bind(&input.duration)
            .bind(&input.views)
            .bind(input.is_featured)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Update a video. When `youtube_url` changes the embed id is re-derived
    /// (and cleared if the new URL has none); otherwise it is left alone.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let embed_id = input.youtube_url.as_deref().and_then(extract_youtube_id);
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                youtube_url = COALESCE($3, youtube_url),
                youtube_embed_id = CASE WHEN $3::text IS NULL THEN youtube_embed_id ELSE $4 END,
                thumbnail_url = COALESCE($5, thumbnail_url),
                watermark_url = COALESCE($6, watermark_url),
                duration = COALESCE($7, duration),
                views = COALESCE($8, views),
                is_featured = COALESCE($9, is_featured),
                is_visible = COALESCE($10, is_visible),
                sort_order = COALESCE($11, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.youtube_url)
            .bind(embed_id)
            .bind(&input.thumbnail_url)
            .bind(&input.watermark_url)
            .bind(&input.duration)
            .bind(&input.views)
            .bind(input.is_featured)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
