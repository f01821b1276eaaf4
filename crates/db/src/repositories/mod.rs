//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Collection repositories expose a
//! `list_visible` read (visible rows in display order) for the public site
//! and unfiltered reads and writes for the admin surface; singleton
//! repositories expose `find` (at most one row) and `upsert`.

pub mod about_repo;
pub mod archive_category_repo;
pub mod archive_item_repo;
pub mod contact_settings_repo;
pub mod contact_submission_repo;
pub mod footer_settings_repo;
pub mod nav_link_repo;
pub mod project_repo;
pub mod session_repo;
pub mod site_settings_repo;
pub mod tour_date_repo;
pub mod user_repo;
pub mod user_role_repo;
pub mod video_repo;

pub use about_repo::AboutSectionRepo;
pub use archive_category_repo::ArchiveCategoryRepo;
pub use archive_item_repo::ArchiveItemRepo;
pub use contact_settings_repo::ContactSettingsRepo;
pub use contact_submission_repo::ContactSubmissionRepo;
pub use footer_settings_repo::FooterSettingsRepo;
pub use nav_link_repo::NavLinkRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use site_settings_repo::SiteSettingsRepo;
pub use tour_date_repo::TourDateRepo;
pub use user_repo::UserRepo;
pub use user_role_repo::UserRoleRepo;
pub use video_repo::VideoRepo;
