//! Postgres implementations of the site runtime's backend traits.
//!
//! The server mounts its own [`SiteContent`](marquee_site::SiteContent) over
//! [`PgContentSource`] to serve `/content`, and runs the same admin check
//! chain as the browser gate over [`PgRoleCheck`].

use async_trait::async_trait;
use marquee_core::roles::AppRole;
use marquee_core::types::DbId;
use marquee_db::models::about::AboutSection;
use marquee_db::models::archive::ArchiveCategory;
use marquee_db::models::contact_settings::ContactSettings;
use marquee_db::models::footer_settings::FooterSettings;
use marquee_db::models::nav_link::NavLink;
use marquee_db::models::project::Project;
use marquee_db::models::site_settings::SiteSettings;
use marquee_db::models::tour_date::TourDate;
use marquee_db::models::video::Video;
use marquee_db::repositories::{
    AboutSectionRepo, ArchiveCategoryRepo, ContactSettingsRepo, FooterSettingsRepo, NavLinkRepo,
    ProjectRepo, SiteSettingsRepo, TourDateRepo, UserRoleRepo, VideoRepo,
};
use marquee_db::DbPool;
use marquee_site::gate::{RoleCheck, RoleCheckError};
use marquee_site::hydration::{ContentSource, SourceError};

fn source_error(e: sqlx::Error) -> SourceError {
    SourceError::Backend(e.to_string())
}

fn role_error(e: sqlx::Error) -> RoleCheckError {
    RoleCheckError::Backend(e.to_string())
}

/// Visible-filtered, ordered content reads straight from the repositories.
#[derive(Clone)]
pub struct PgContentSource {
    pool: DbPool,
}

impl PgContentSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentSource for PgContentSource {
    async fn site_settings(&self) -> Result<Option<SiteSettings>, SourceError> {
        SiteSettingsRepo::find(&self.pool).await.map_err(source_error)
    }

    async fn about_section(&self) -> Result<Option<AboutSection>, SourceError> {
        AboutSectionRepo::find(&self.pool).await.map_err(source_error)
    }

    async fn projects(&self) -> Result<Vec<Project>, SourceError> {
        ProjectRepo::list_visible(&self.pool).await.map_err(source_error)
    }

    async fn videos(&self) -> Result<Vec<Video>, SourceError> {
        VideoRepo::list_visible(&self.pool).await.map_err(source_error)
    }

    async fn tour_dates(&self) -> Result<Vec<TourDate>, SourceError> {
        TourDateRepo::list_visible(&self.pool).await.map_err(source_error)
    }

    async fn archive_categories(&self) -> Result<Vec<ArchiveCategory>, SourceError> {
        ArchiveCategoryRepo::list_visible(&self.pool)
            .await
            .map_err(source_error)
    }

    async fn contact_settings(&self) -> Result<Option<ContactSettings>, SourceError> {
        ContactSettingsRepo::find(&self.pool).await.map_err(source_error)
    }

    async fn footer_settings(&self) -> Result<Option<FooterSettings>, SourceError> {
        FooterSettingsRepo::find(&self.pool).await.map_err(source_error)
    }

    async fn nav_links(&self) -> Result<Vec<NavLink>, SourceError> {
        NavLinkRepo::list_visible(&self.pool).await.map_err(source_error)
    }
}

/// Role checks against the `has_role` SQL function and the `user_roles`
/// table.
#[derive(Clone)]
pub struct PgRoleCheck {
    pool: DbPool,
}

impl PgRoleCheck {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleCheck for PgRoleCheck {
    async fn has_role(&self, user_id: DbId, role: AppRole) -> Result<bool, RoleCheckError> {
        UserRoleRepo::has_role(&self.pool, user_id, role)
            .await
            .map_err(role_error)
    }

    async fn lookup_role(&self, user_id: DbId, role: AppRole) -> Result<bool, RoleCheckError> {
        UserRoleRepo::find(&self.pool, user_id, role)
            .await
            .map(|row| row.is_some())
            .map_err(role_error)
    }
}
