//! Repository for the `about_section` singleton.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::about::{AboutSection, UpsertAboutSection};

const COLUMNS: &str = "id, title, subtitle, content, image_url, stats, created_at, updated_at";

pub struct AboutSectionRepo;

impl AboutSectionRepo {
    pub async fn find(pool: &PgPool) -> Result<Option<AboutSection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM about_section LIMIT 1");
        sqlx::query_as::<_, AboutSection>(&query)
            .fetch_optional(pool)
            .await
    }

    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertAboutSection,
    ) -> Result<AboutSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO about_section (title, subtitle, content, image_url, stats)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_about_section_singleton DO UPDATE SET
                title = EXCLUDED.title,
                subtitle = EXCLUDED.subtitle,
                content = EXCLUDED.content,
                image_url = EXCLUDED.image_url,
                stats = EXCLUDED.stats
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AboutSection>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(Json(&input.stats))
            .fetch_one(pool)
            .await
    }
}
