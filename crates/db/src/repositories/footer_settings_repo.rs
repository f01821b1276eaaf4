//! Repository for the `footer_settings` singleton.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::footer_settings::{FooterSettings, UpsertFooterSettings};

const COLUMNS: &str =
    "id, copyright_text, show_social_links, additional_links, created_at, updated_at";

pub struct FooterSettingsRepo;

impl FooterSettingsRepo {
    pub async fn find(pool: &PgPool) -> Result<Option<FooterSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM footer_settings LIMIT 1");
        sqlx::query_as::<_, FooterSettings>(&query)
            .fetch_optional(pool)
            .await
    }

    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertFooterSettings,
    ) -> Result<FooterSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO footer_settings (copyright_text, show_social_links, additional_links)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_footer_settings_singleton DO UPDATE SET
                copyright_text = EXCLUDED.copyright_text,
                show_social_links = EXCLUDED.show_social_links,
                additional_links = EXCLUDED.additional_links
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FooterSettings>(&query)
            .bind(&input.copyright_text)
            .bind(input.show_social_links)
            .bind(Json(&input.additional_links))
            .fetch_one(pool)
            .await
    }
}
