use std::collections::BTreeSet;

use chrono::Utc;
use marquee_core::content::ContentTable;
use marquee_core::types::Timestamp;
use marquee_db::models::about::AboutSection;
use marquee_db::models::archive::ArchiveCategory;
use marquee_db::models::contact_settings::ContactSettings;
use marquee_db::models::footer_settings::FooterSettings;
use marquee_db::models::nav_link::NavLink;
use marquee_db::models::project::Project;
use marquee_db::models::site_settings::SiteSettings;
use marquee_db::models::tour_date::TourDate;
use marquee_db::models::video::Video;
use serde::{Deserialize, Serialize};

use super::source::{ContentSource, SourceError};

/// Everything the public pages render from, as of one batch of reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub site_settings: Option<SiteSettings>,
    pub about_section: Option<AboutSection>,
    pub projects: Vec<Project>,
    pub videos: Vec<Video>,
    pub tour_dates: Vec<TourDate>,
    pub archive_categories: Vec<ArchiveCategory>,
    pub contact_settings: Option<ContactSettings>,
    pub footer_settings: Option<FooterSettings>,
    pub nav_links: Vec<NavLink>,
    /// `true` only before the first batch completes.
    pub loading: bool,
    /// Tables whose last read failed. Their fields hold empty data.
    pub failed_tables: BTreeSet<ContentTable>,
    /// Number of completed batches; `0` while loading.
    pub generation: u64,
    pub fetched_at: Option<Timestamp>,
}

impl ContentSnapshot {
    /// The empty snapshot published before the first batch completes.
    pub fn loading() -> Self {
        Self {
            site_settings: None,
            about_section: None,
            projects: Vec::new(),
            videos: Vec::new(),
            tour_dates: Vec::new(),
            archive_categories: Vec::new(),
            contact_settings: None,
            footer_settings: None,
            nav_links: Vec::new(),
            loading: true,
            failed_tables: BTreeSet::new(),
            generation: 0,
            fetched_at: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.failed_tables.is_empty()
    }

    /// Compare the content only, ignoring batch bookkeeping.
    pub fn same_content(&self, other: &ContentSnapshot) -> bool {
        self.site_settings == other.site_settings
            && self.about_section == other.about_section
            && self.projects == other.projects
            && self.videos == other.videos
            && self.tour_dates == other.tour_dates
            && self.archive_categories == other.archive_categories
            && self.contact_settings == other.contact_settings
            && self.footer_settings == other.footer_settings
            && self.nav_links == other.nav_links
    }
}

/// Issue all nine reads concurrently and assemble a snapshot.
///
/// A failed read is logged, recorded in `failed_tables` and replaced with
/// empty data; the other reads are unaffected.
pub async fn fetch_snapshot<S>(source: &S, generation: u64) -> ContentSnapshot
where
    S: ContentSource + ?Sized,
{
    let (
        site_settings,
        about_section,
        projects,
        videos,
        tour_dates,
        archive_categories,
        contact_settings,
        footer_settings,
        nav_links,
    ) = tokio::join!(
        source.site_settings(),
        source.about_section(),
        source.projects(),
        source.videos(),
        source.tour_dates(),
        source.archive_categories(),
        source.contact_settings(),
        source.footer_settings(),
        source.nav_links(),
    );

    let mut failed = BTreeSet::new();
    ContentSnapshot {
        site_settings: settle(ContentTable::SiteSettings, site_settings, &mut failed),
        about_section: settle(ContentTable::AboutSection, about_section, &mut failed),
        projects: settle(ContentTable::Projects, projects, &mut failed),
        videos: settle(ContentTable::Videos, videos, &mut failed),
        tour_dates: settle(ContentTable::TourDates, tour_dates, &mut failed),
        archive_categories: settle(ContentTable::ArchiveCategories, archive_categories, &mut failed),
        contact_settings: settle(ContentTable::ContactSettings, contact_settings, &mut failed),
        footer_settings: settle(ContentTable::FooterSettings, footer_settings, &mut failed),
        nav_links: settle(ContentTable::NavLinks, nav_links, &mut failed),
        loading: false,
        failed_tables: failed,
        generation,
        fetched_at: Some(Utc::now()),
    }
}

fn settle<T: Default>(
    table: ContentTable,
    result: Result<T, SourceError>,
    failed: &mut BTreeSet<ContentTable>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(%table, error = %e, "Content read failed, using empty data");
            failed.insert(table);
            T::default()
        }
    }
}
