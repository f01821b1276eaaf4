//! Handlers for `/admin/archive-categories` and `/admin/archive-items`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marquee_core::slug::resolve_slug;
use marquee_core::types::DbId;
use marquee_db::models::archive::{
    ArchiveCategory, ArchiveItem, CreateArchiveCategory, CreateArchiveItem,
    UpdateArchiveCategory, UpdateArchiveItem,
};
use marquee_db::repositories::{ArchiveCategoryRepo, ArchiveItemRepo};
use serde::Deserialize;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/archive-categories
pub async fn list_categories(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ArchiveCategory>>>> {
    let categories = ArchiveCategoryRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/admin/archive-categories
///
/// The slug is taken from the body when given, else derived from the
/// title. A taken slug is a 409.
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateArchiveCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<ArchiveCategory>>)> {
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let category = ArchiveCategoryRepo::create(&state.pool, &input, &slug).await?;
    tracing::info!(
        category_id = %category.id,
        slug = %category.slug,
        user_id = %admin.user_id,
        "Archive category created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/admin/archive-categories/{id}
pub async fn update_category(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateArchiveCategory>,
) -> AppResult<Json<DataResponse<ArchiveCategory>>> {
    // A blank slug means "leave as is"; anything else is normalized.
    input.slug = match input.slug.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(resolve_slug(Some(raw), raw)?),
        _ => None,
    };
    let category = ArchiveCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("ArchiveCategory", id))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/archive-categories/{id}
///
/// Items in the category are removed with it.
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ArchiveCategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found("ArchiveCategory", id));
    }
    tracing::info!(category_id = %id, user_id = %admin.user_id, "Archive category deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ItemFilter {
    pub category_id: Option<DbId>,
}

/// GET /api/v1/admin/archive-items?category_id=
pub async fn list_items(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<ItemFilter>,
) -> AppResult<Json<DataResponse<Vec<ArchiveItem>>>> {
    let items = ArchiveItemRepo::list_all(&state.pool, filter.category_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/archive-items
pub async fn create_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateArchiveItem>,
) -> AppResult<(StatusCode, Json<DataResponse<ArchiveItem>>)> {
    let item = ArchiveItemRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/archive-items/{id}
pub async fn update_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArchiveItem>,
) -> AppResult<Json<DataResponse<ArchiveItem>>> {
    let item = ArchiveItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("ArchiveItem", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/archive-items/{id}
pub async fn delete_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ArchiveItemRepo::delete(&state.pool, id).await? {
        return Err(not_found("ArchiveItem", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
