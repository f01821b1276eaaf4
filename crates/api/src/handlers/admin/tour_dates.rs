//! Handlers for `/admin/tour-dates`. Unknown `status` values are rejected
//! when the body is deserialized.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use marquee_core::types::DbId;
use marquee_db::models::tour_date::{CreateTourDate, TourDate, UpdateTourDate};
use marquee_db::repositories::TourDateRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/tour-dates
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TourDate>>>> {
    let dates = TourDateRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: dates }))
}

/// POST /api/v1/admin/tour-dates
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTourDate>,
) -> AppResult<(StatusCode, Json<DataResponse<TourDate>>)> {
    let date = TourDateRepo::create(&state.pool, &input).await?;
    tracing::info!(tour_date_id = %date.id, user_id = %admin.user_id, "Tour date created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: date })))
}

/// PUT /api/v1/admin/tour-dates/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTourDate>,
) -> AppResult<Json<DataResponse<TourDate>>> {
    let date = TourDateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("TourDate", id))?;
    Ok(Json(DataResponse { data: date }))
}

/// DELETE /api/v1/admin/tour-dates/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TourDateRepo::delete(&state.pool, id).await? {
        return Err(not_found("TourDate", id));
    }
    tracing::info!(tour_date_id = %id, user_id = %admin.user_id, "Tour date deleted");
    Ok(StatusCode::NO_CONTENT)
}
