//! Handlers for `/admin/videos`. The repository derives the embed id from
//! `youtube_url` on every write.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use marquee_core::types::DbId;
use marquee_db::models::video::{CreateVideo, UpdateVideo, Video};
use marquee_db::repositories::VideoRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/videos
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Video>>>> {
    let videos = VideoRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// POST /api/v1/admin/videos
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateVideo>,
) -> AppResult<(StatusCode, Json<DataResponse<Video>>)> {
    let video = VideoRepo::create(&state.pool, &input).await?;
    if video.youtube_url.is_some() && video.youtube_embed_id.is_none() {
        tracing::warn!(video_id = %video.id, "No YouTube id found in video URL");
    }
    tracing::info!(video_id = %video.id, user_id = %admin.user_id, "Video created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// PUT /api/v1/admin/videos/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<Json<DataResponse<Video>>> {
    let video = VideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Video", id))?;
    Ok(Json(DataResponse { data: video }))
}

/// DELETE /api/v1/admin/videos/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VideoRepo::delete(&state.pool, id).await? {
        return Err(not_found("Video", id));
    }
    tracing::info!(video_id = %id, user_id = %admin.user_id, "Video deleted");
    Ok(StatusCode::NO_CONTENT)
}
