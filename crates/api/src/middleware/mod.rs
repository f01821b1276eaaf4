//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`]: the user behind a valid Bearer access token.
//! - [`rbac::RequireAdmin`]: an [`AuthUser`](auth::AuthUser) the admin check
//!   accepts.

pub mod auth;
pub mod rbac;
