//! Repository for the `site_settings` singleton.

use sqlx::PgPool;

use crate::models::site_settings::{SiteSettings, UpsertSiteSettings};

const COLUMNS: &str = "id, site_name, site_tagline, hero_title, hero_subtitle, hero_image_url, \
                       hero_background_gradient, privacy_policy, terms_of_service, \
                       created_at, updated_at";

pub struct SiteSettingsRepo;

impl SiteSettingsRepo {
    /// Fetch the settings row, if one has been saved.
    pub async fn find(pool: &PgPool) -> Result<Option<SiteSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings LIMIT 1");
        sqlx::query_as::<_, SiteSettings>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Insert the row or replace every field of the existing one.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertSiteSettings,
    ) -> Result<SiteSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_settings
                (site_name, site_tagline, hero_title, hero_subtitle, hero_image_url,
                 hero_background_gradient, privacy_policy, terms_of_service)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT ON CONSTRAINT uq_site_settings_singleton DO UPDATE SET
                site_name = EXCLUDED.site_name,
                site_tagline = EXCLUDED.site_tagline,
                hero_title = EXCLUDED.hero_title,
                hero_subtitle = EXCLUDED.hero_subtitle,
                hero_image_url = EXCLUDED.hero_image_url,
                hero_background_gradient = EXCLUDED.hero_background_gradient,
                privacy_policy = EXCLUDED.privacy_policy,
                terms_of_service = EXCLUDED.terms_of_service
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSettings>(&query)
            .bind(&input.site_name)
            .bind(&input.site_tagline)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(&input.hero_image_url)
            .bind(&input.hero_background_gradient)
            .bind(&input.privacy_policy)
            .bind(&input.terms_of_service)
            .fetch_one(pool)
            .await
    }
}
