//! Admin content management. Every handler here takes
//! [`RequireAdmin`](crate::middleware::rbac::RequireAdmin).

pub mod archive;
pub mod nav_links;
pub mod projects;
pub mod tour_dates;
pub mod videos;

use marquee_core::error::CoreError;
use marquee_core::types::DbId;

use crate::error::AppError;

pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::not_found(entity, id))
}
