//! Handlers for `/admin/nav-links`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use marquee_core::types::DbId;
use marquee_db::models::nav_link::{CreateNavLink, NavLink, UpdateNavLink};
use marquee_db::repositories::NavLinkRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<NavLink>>>> {
    let links = NavLinkRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: links }))
}

pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNavLink>,
) -> AppResult<(StatusCode, Json<DataResponse<NavLink>>)> {
    let link = NavLinkRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNavLink>,
) -> AppResult<Json<DataResponse<NavLink>>> {
    let link = NavLinkRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("NavLink", id))?;
    Ok(Json(DataResponse { data: link }))
}

pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NavLinkRepo::delete(&state.pool, id).await? {
        return Err(not_found("NavLink", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
