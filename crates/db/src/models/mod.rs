//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` + `Deserialize` struct matching the database row
//!   (rows are also decoded by the remote client, hence `Deserialize`)
//! - A `Deserialize` create DTO for inserts, or an upsert DTO for singletons
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod about;
pub mod archive;
pub mod contact_settings;
pub mod contact_submission;
pub mod footer_settings;
pub mod nav_link;
pub mod project;
pub mod session;
pub mod site_settings;
pub mod tour_date;
pub mod user;
pub mod user_role;
pub mod video;
