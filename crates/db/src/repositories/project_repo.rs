//! Repository for the `projects` table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, image_url, link_url, link_text, category, \
                       is_featured, is_visible, sort_order, created_at, updated_at";

/// Provides reads and admin writes for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Visible projects in display order.
    pub async fn list_visible(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE is_visible = true
             ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Every project, hidden ones included, in display order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY sort_order ASC, created_at ASC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (title, description, image_url, link_url, link_text, category,
                 is_featured, is_visible, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, false), COALESCE($8, true), COALESCE($9, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(&input.link_text)
            .bind(&input.category)
            .bind(input.is_featured)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                link_url = COALESCE($5, link_url),
                link_text = COALESCE($6, link_text),
                category = COALESCE($7, category),
                is_featured = COALESCE($8, is_featured),
                is_visible = COALESCE($9, is_visible),
                sort_order = COALESCE($10, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(&input.link_text)
            .bind(&input.category)
            .bind(input.is_featured)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
