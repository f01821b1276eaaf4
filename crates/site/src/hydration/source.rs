use async_trait::async_trait;
use marquee_db::models::about::AboutSection;
use marquee_db::models::archive::ArchiveCategory;
use marquee_db::models::contact_settings::ContactSettings;
use marquee_db::models::footer_settings::FooterSettings;
use marquee_db::models::nav_link::NavLink;
use marquee_db::models::project::Project;
use marquee_db::models::site_settings::SiteSettings;
use marquee_db::models::tour_date::TourDate;
use marquee_db::models::video::Video;

/// Failure of a single content read.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// The backend could not be reached or failed the query.
    #[error("Content backend error: {0}")]
    Backend(String),

    /// The backend answered with a non-success status.
    #[error("Content backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response could not be decoded into rows.
    #[error("Content decode error: {0}")]
    Decode(String),
}

/// One read per content table.
///
/// Collection reads return only visible rows, ordered by `sort_order`
/// (tour dates by `event_date`). Singleton reads return at most one row.
#[async_trait]
pub trait ContentSource: Send + Sync + 'static {
    async fn site_settings(&self) -> Result<Option<SiteSettings>, SourceError>;
    async fn about_section(&self) -> Result<Option<AboutSection>, SourceError>;
    async fn projects(&self) -> Result<Vec<Project>, SourceError>;
    async fn videos(&self) -> Result<Vec<Video>, SourceError>;
    async fn tour_dates(&self) -> Result<Vec<TourDate>, SourceError>;
    async fn archive_categories(&self) -> Result<Vec<ArchiveCategory>, SourceError>;
    async fn contact_settings(&self) -> Result<Option<ContactSettings>, SourceError>;
    async fn footer_settings(&self) -> Result<Option<FooterSettings>, SourceError>;
    async fn nav_links(&self) -> Result<Vec<NavLink>, SourceError>;
}
