//! Public read handlers.
//!
//! Collection reads return visible rows in display order; singleton reads
//! return `{ "data": null }` until the row is first saved.

use axum::extract::{Path, State};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_db::models::about::AboutSection;
use marquee_db::models::archive::{ArchiveCategory, ArchiveItem};
use marquee_db::models::contact_settings::ContactSettings;
use marquee_db::models::footer_settings::FooterSettings;
use marquee_db::models::nav_link::NavLink;
use marquee_db::models::project::Project;
use marquee_db::models::site_settings::SiteSettings;
use marquee_db::models::tour_date::TourDate;
use marquee_db::models::video::Video;
use marquee_db::repositories::{
    AboutSectionRepo, ArchiveCategoryRepo, ArchiveItemRepo, ContactSettingsRepo,
    FooterSettingsRepo, NavLinkRepo, ProjectRepo, SiteSettingsRepo, TourDateRepo, VideoRepo,
};
use marquee_site::hydration::ContentSnapshot;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

type Data<T> = AppResult<Json<DataResponse<T>>>;

fn data<T: Serialize>(data: T) -> Data<T> {
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/content
///
/// The server's hydrated snapshot of every content table. Tables whose
/// last read failed are listed in `failed_tables`.
pub async fn snapshot(State(state): State<AppState>) -> Data<ContentSnapshot> {
    data(ContentSnapshot::clone(&state.content.snapshot()))
}

/// GET /api/v1/site-settings
pub async fn site_settings(State(state): State<AppState>) -> Data<Option<SiteSettings>> {
    data(SiteSettingsRepo::find(&state.pool).await?)
}

/// GET /api/v1/about
pub async fn about(State(state): State<AppState>) -> Data<Option<AboutSection>> {
    data(AboutSectionRepo::find(&state.pool).await?)
}

/// GET /api/v1/contact-settings
pub async fn contact_settings(State(state): State<AppState>) -> Data<Option<ContactSettings>> {
    data(ContactSettingsRepo::find(&state.pool).await?)
}

/// GET /api/v1/footer-settings
pub async fn footer_settings(State(state): State<AppState>) -> Data<Option<FooterSettings>> {
    data(FooterSettingsRepo::find(&state.pool).await?)
}

/// GET /api/v1/projects
pub async fn projects(State(state): State<AppState>) -> Data<Vec<Project>> {
    data(ProjectRepo::list_visible(&state.pool).await?)
}

/// GET /api/v1/videos
pub async fn videos(State(state): State<AppState>) -> Data<Vec<Video>> {
    data(VideoRepo::list_visible(&state.pool).await?)
}

/// GET /api/v1/tour-dates
pub async fn tour_dates(State(state): State<AppState>) -> Data<Vec<TourDate>> {
    data(TourDateRepo::list_visible(&state.pool).await?)
}

/// GET /api/v1/archive-categories
pub async fn archive_categories(State(state): State<AppState>) -> Data<Vec<ArchiveCategory>> {
    data(ArchiveCategoryRepo::list_visible(&state.pool).await?)
}

/// GET /api/v1/archive-categories/{slug}/items
///
/// 404 when the category does not exist or is hidden.
pub async fn archive_items(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Data<Vec<ArchiveItem>> {
    let category = ArchiveCategoryRepo::find_visible_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Archive category", &slug)))?;
    data(ArchiveItemRepo::list_visible_for_category(&state.pool, category.id).await?)
}

/// GET /api/v1/nav-links
pub async fn nav_links(State(state): State<AppState>) -> Data<Vec<NavLink>> {
    data(NavLinkRepo::list_visible(&state.pool).await?)
}
