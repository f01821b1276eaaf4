//! Shared response envelope.
//!
//! Every `/api/v1` success body is `{ "data": ... }`. Use [`DataResponse`]
//! rather than ad-hoc `json!` so the payload stays typed.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: projects }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
