//! Admin inbox for contact form submissions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marquee_core::types::DbId;
use marquee_db::models::contact_submission::ContactSubmission;
use marquee_db::repositories::ContactSubmissionRepo;
use serde::Deserialize;

use super::admin::not_found;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct SubmissionListParams {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub is_read: bool,
}

/// GET /api/v1/admin/contact-submissions?unread_only=&limit=&offset=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<SubmissionListParams>,
) -> AppResult<Json<DataResponse<Vec<ContactSubmission>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);
    let submissions =
        ContactSubmissionRepo::list(&state.pool, params.unread_only, limit, offset).await?;
    Ok(Json(DataResponse { data: submissions }))
}

/// PUT /api/v1/admin/contact-submissions/{id}/read
pub async fn set_read(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MarkReadRequest>,
) -> AppResult<Json<DataResponse<ContactSubmission>>> {
    let submission = ContactSubmissionRepo::set_read(&state.pool, id, input.is_read)
        .await?
        .ok_or_else(|| not_found("ContactSubmission", id))?;
    Ok(Json(DataResponse { data: submission }))
}

/// DELETE /api/v1/admin/contact-submissions/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContactSubmissionRepo::delete(&state.pool, id).await? {
        return Err(not_found("ContactSubmission", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
