//! Role-check endpoints used by the auth gate: the `has_role` procedure and
//! a direct `user_roles` lookup.

use axum::extract::{Query, State};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::roles::AppRole;
use marquee_core::types::DbId;
use marquee_db::models::user_role::UserRole;
use marquee_db::repositories::UserRoleRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /rpc/has-role` and query of `GET /user-roles`.
#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    pub user_id: DbId,
    pub role: AppRole,
}

/// Callers may ask about themselves; asking about anyone else requires the
/// admin check to pass.
async fn ensure_may_inspect(state: &AppState, caller: &AuthUser, user_id: DbId) -> AppResult<()> {
    if caller.user_id == user_id {
        return Ok(());
    }
    let verdict = state
        .admin_check
        .evaluate(&state.roles(), &caller.session_user())
        .await;
    if verdict.is_admin {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Cannot inspect another user's roles".into(),
        )))
    }
}

/// POST /api/v1/rpc/has-role
pub async fn has_role(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<RoleQuery>,
) -> AppResult<Json<DataResponse<bool>>> {
    ensure_may_inspect(&state, &caller, input.user_id).await?;
    let held = UserRoleRepo::has_role(&state.pool, input.user_id, input.role).await?;
    Ok(Json(DataResponse { data: held }))
}

/// GET /api/v1/user-roles?user_id=&role=
///
/// At most one assignment; `data` is `null` when the role is not held.
pub async fn find_user_role(
    State(state): State<AppState>,
    caller: AuthUser,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<DataResponse<Option<UserRole>>>> {
    ensure_may_inspect(&state, &caller, query.user_id).await?;
    let row = UserRoleRepo::find(&state.pool, query.user_id, query.role).await?;
    Ok(Json(DataResponse { data: row }))
}
