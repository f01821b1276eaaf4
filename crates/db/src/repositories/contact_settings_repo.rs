//! Repository for the `contact_settings` singleton.

use sqlx::PgPool;

use crate::models::contact_settings::{ContactSettings, UpsertContactSettings};

const COLUMNS: &str = "id, title, subtitle, description, management_email, instagram_url, \
                       tiktok_url, twitter_url, youtube_url, created_at, updated_at";

pub struct ContactSettingsRepo;

impl ContactSettingsRepo {
    pub async fn find(pool: &PgPool) -> Result<Option<ContactSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_settings LIMIT 1");
        sqlx::query_as::<_, ContactSettings>(&query)
            .fetch_optional(pool)
            .await
    }

    /// The address contact-form notifications go to, when one is configured
    /// and non-blank.
    pub async fn management_email(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
        let email: Option<Option<String>> =
            sqlx::query_scalar("SELECT management_email FROM contact_settings LIMIT 1")
                .fetch_optional(pool)
                .await?;
        Ok(email.flatten().filter(|e| !e.trim().is_empty()))
    }

    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertContactSettings,
    ) -> Result<ContactSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_settings
                (title, subtitle, description, management_email,
                 instagram_url, tiktok_url, twitter_url, youtube_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT ON CONSTRAINT uq_contact_settings_singleton DO UPDATE SET
                title = EXCLUDED.title,
                subtitle = EXCLUDED.subtitle,
                description = EXCLUDED.description,
                management_email = EXCLUDED.management_email,
                instagram_url = EXCLUDED.instagram_url,
                tiktok_url = EXCLUDED.tiktok_url,
                twitter_url = EXCLUDED.twitter_url,
                youtube_url = EXCLUDED.youtube_url
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSettings>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.management_email)
            .bind(&input.instagram_url)
            .bind(&input.tiktok_url)
            .bind(&input.twitter_url)
            .bind(&input.youtube_url)
            .fetch_one(pool)
            .await
    }
}
