//! Admin upserts for the singleton settings rows.

use axum::extract::State;
use axum::Json;
use marquee_core::error::CoreError;
use marquee_db::models::about::{AboutSection, UpsertAboutSection};
use marquee_db::models::contact_settings::{ContactSettings, UpsertContactSettings};
use marquee_db::models::footer_settings::{FooterSettings, UpsertFooterSettings};
use marquee_db::models::site_settings::{SiteSettings, UpsertSiteSettings};
use marquee_db::repositories::{
    AboutSectionRepo, ContactSettingsRepo, FooterSettingsRepo, SiteSettingsRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/admin/site-settings
pub async fn put_site_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<UpsertSiteSettings>,
) -> AppResult<Json<DataResponse<SiteSettings>>> {
    input.site_name = input.site_name.trim().to_string();
    if input.site_name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "site_name must not be empty".into(),
        )));
    }
    let settings = SiteSettingsRepo::upsert(&state.pool, &input).await?;
    tracing::info!(user_id = %admin.user_id, "Site settings updated");
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/about
pub async fn put_about(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpsertAboutSection>,
) -> AppResult<Json<DataResponse<AboutSection>>> {
    let about = AboutSectionRepo::upsert(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: about }))
}

/// PUT /api/v1/admin/contact-settings
pub async fn put_contact_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpsertContactSettings>,
) -> AppResult<Json<DataResponse<ContactSettings>>> {
    let settings = ContactSettingsRepo::upsert(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/footer-settings
pub async fn put_footer_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpsertFooterSettings>,
) -> AppResult<Json<DataResponse<FooterSettings>>> {
    let settings = FooterSettingsRepo::upsert(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: settings }))
}
