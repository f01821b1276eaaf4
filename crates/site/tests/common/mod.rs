//! In-memory backends for the hydration and gate tests.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use marquee_core::content::ContentTable;
use marquee_core::roles::AppRole;
use marquee_core::types::DbId;
use marquee_db::models::about::AboutSection;
use marquee_db::models::archive::ArchiveCategory;
use marquee_db::models::contact_settings::ContactSettings;
use marquee_db::models::footer_settings::FooterSettings;
use marquee_db::models::nav_link::NavLink;
use marquee_db::models::project::Project;
use marquee_db::models::site_settings::SiteSettings;
use marquee_db::models::tour_date::TourDate;
use marquee_db::models::video::Video;
use marquee_site::gate::{
    AuthBackend, AuthError, AuthEvent, RoleCheck, RoleCheckError, Session, SessionChange,
    SessionUser,
};
use marquee_site::hydration::{ContentSource, SourceError};
use tokio::sync::{broadcast, Notify};

// ---------------------------------------------------------------------------
// Row builders
// ---------------------------------------------------------------------------

pub fn project(title: &str, sort_order: i32) -> Project {
    Project {
        id: DbId::new_v4(),
        title: title.to_string(),
        description: None,
        image_url: None,
        link_url: None,
        link_text: None,
        category: None,
        is_featured: false,
        is_visible: true,
        sort_order,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn tour_date(venue: &str, status: &str, ticket_url: Option<&str>) -> TourDate {
    TourDate {
        id: DbId::new_v4(),
        venue_name: venue.to_string(),
        city: "Berlin".to_string(),
        country: Some("DE".to_string()),
        event_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        event_time: None,
        ticket_url: ticket_url.map(str::to_string),
        ticket_price: None,
        status: status.to_string(),
        additional_info: None,
        is_visible: true,
        sort_order: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn nav_link(name: &str, href: &str) -> NavLink {
    NavLink {
        id: DbId::new_v4(),
        name: name.to_string(),
        href: href.to_string(),
        is_visible: true,
        sort_order: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn site_settings(name: &str) -> SiteSettings {
    SiteSettings {
        id: DbId::new_v4(),
        site_name: name.to_string(),
        site_tagline: None,
        hero_title: Some("Live".to_string()),
        hero_subtitle: None,
        hero_image_url: None,
        hero_background_gradient: None,
        privacy_policy: None,
        terms_of_service: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// FakeSource
// ---------------------------------------------------------------------------

/// Content source backed by mutable in-memory rows.
#[derive(Default)]
pub struct FakeSource {
    pub site_settings: Mutex<Option<SiteSettings>>,
    pub projects: Mutex<Vec<Project>>,
    pub tour_dates: Mutex<Vec<TourDate>>,
    pub nav_links: Mutex<Vec<NavLink>>,
    /// Tables whose reads fail.
    pub failing: Mutex<BTreeSet<ContentTable>>,
    /// Artificial latency of every read.
    pub delay: Option<Duration>,
    /// Number of `projects` reads started.
    pub project_reads: AtomicUsize,
    in_flight: AtomicUsize,
    /// Highest number of concurrent `projects` reads observed.
    pub max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn set_projects(&self, projects: Vec<Project>) {
        *self.projects.lock().unwrap() = projects;
    }

    pub fn fail(&self, table: ContentTable) {
        self.failing.lock().unwrap().insert(table);
    }

    pub fn heal(&self, table: ContentTable) {
        self.failing.lock().unwrap().remove(&table);
    }

    async fn read<T: Clone>(&self, table: ContentTable, value: &Mutex<T>) -> Result<T, SourceError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.lock().unwrap().contains(&table) {
            return Err(SourceError::Backend(format!("{table} unavailable")));
        }
        Ok(value.lock().unwrap().clone())
    }
}

#[async_trait]
impl ContentSource for FakeSource {
    async fn site_settings(&self) -> Result<Option<SiteSettings>, SourceError> {
        self.read(ContentTable::SiteSettings, &self.site_settings).await
    }

    async fn about_section(&self) -> Result<Option<AboutSection>, SourceError> {
        self.read(ContentTable::AboutSection, &Mutex::new(None)).await
    }

    async fn projects(&self) -> Result<Vec<Project>, SourceError> {
        self.project_reads.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let result = self.read(ContentTable::Projects, &self.projects).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn videos(&self) -> Result<Vec<Video>, SourceError> {
        self.read(ContentTable::Videos, &Mutex::new(Vec::new())).await
    }

    async fn tour_dates(&self) -> Result<Vec<TourDate>, SourceError> {
        self.read(ContentTable::TourDates, &self.tour_dates).await
    }

    async fn archive_categories(&self) -> Result<Vec<ArchiveCategory>, SourceError> {
        self.read(ContentTable::ArchiveCategories, &Mutex::new(Vec::new())).await
    }

    async fn contact_settings(&self) -> Result<Option<ContactSettings>, SourceError> {
        self.read(ContentTable::ContactSettings, &Mutex::new(None)).await
    }

    async fn footer_settings(&self) -> Result<Option<FooterSettings>, SourceError> {
        self.read(ContentTable::FooterSettings, &Mutex::new(None)).await
    }

    async fn nav_links(&self) -> Result<Vec<NavLink>, SourceError> {
        self.read(ContentTable::NavLinks, &self.nav_links).await
    }
}

// ---------------------------------------------------------------------------
// FakeAuth
// ---------------------------------------------------------------------------

pub const GOOD_PASSWORD: &str = "correct horse battery";

/// Auth backend with a fixed set of accounts, all sharing one password.
pub struct FakeAuth {
    accounts: HashMap<String, DbId>,
    session: Mutex<Option<Session>>,
    changes: broadcast::Sender<SessionChange>,
    /// Latency of `current_session`.
    pub session_delay: Option<Duration>,
    pub fail_sign_out: bool,
}

impl FakeAuth {
    pub fn new(emails: &[&str]) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            accounts: emails
                .iter()
                .map(|e| (e.to_string(), DbId::new_v4()))
                .collect(),
            session: Mutex::new(None),
            changes,
            session_delay: None,
            fail_sign_out: false,
        }
    }

    /// Start with `email` already signed in.
    pub fn signed_in(self, email: &str) -> Self {
        let session = self.session_for(email);
        *self.session.lock().unwrap() = session;
        self
    }

    pub fn user_id(&self, email: &str) -> DbId {
        self.accounts[email]
    }

    pub fn listener_count(&self) -> usize {
        self.changes.receiver_count()
    }

    fn session_for(&self, email: &str) -> Option<Session> {
        self.accounts.get(email).map(|id| Session {
            access_token: format!("token-{id}"),
            refresh_token: Some(format!("refresh-{id}")),
            expires_at: None,
            user: SessionUser {
                id: *id,
                email: email.to_string(),
            },
        })
    }

    fn emit(&self, event: AuthEvent, session: Option<Session>) {
        *self.session.lock().unwrap() = session.clone();
        let _ = self.changes.send(SessionChange { event, session });
    }
}

#[async_trait]
impl AuthBackend for FakeAuth {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        if let Some(delay) = self.session_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.session.lock().unwrap().clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        match self.session_for(email) {
            Some(session) if password == GOOD_PASSWORD => {
                self.emit(AuthEvent::SignedIn, Some(session.clone()));
                Ok(session)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<Session, AuthError> {
        Err(AuthError::Rejected("Sign-ups are closed".to_string()))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.fail_sign_out {
            return Err(AuthError::Unavailable("network down".to_string()));
        }
        self.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn session_changes(&self) -> broadcast::Receiver<SessionChange> {
        self.changes.subscribe()
    }
}

// ---------------------------------------------------------------------------
// FakeRoles
// ---------------------------------------------------------------------------

/// Role checks with scripted answers.
pub struct FakeRoles {
    pub rpc: Mutex<Result<bool, RoleCheckError>>,
    pub table: Mutex<Result<bool, RoleCheckError>>,
    pub rpc_calls: AtomicUsize,
    pub table_calls: AtomicUsize,
    /// When set, the RPC waits for a notification before answering.
    pub rpc_gate: Option<Arc<Notify>>,
}

impl FakeRoles {
    pub fn answering(rpc: Result<bool, RoleCheckError>, table: Result<bool, RoleCheckError>) -> Self {
        Self {
            rpc: Mutex::new(rpc),
            table: Mutex::new(table),
            rpc_calls: AtomicUsize::new(0),
            table_calls: AtomicUsize::new(0),
            rpc_gate: None,
        }
    }

    pub fn broken() -> Self {
        Self::answering(
            Err(RoleCheckError::Backend("rpc down".to_string())),
            Err(RoleCheckError::Backend("table down".to_string())),
        )
    }

    pub fn rpc_calls(&self) -> usize {
        self.rpc_calls.load(Ordering::SeqCst)
    }

    pub fn table_calls(&self) -> usize {
        self.table_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleCheck for FakeRoles {
    async fn has_role(&self, _user_id: DbId, role: AppRole) -> Result<bool, RoleCheckError> {
        assert_eq!(role, AppRole::Admin);
        self.rpc_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.rpc_gate {
            gate.notified().await;
        }
        self.rpc.lock().unwrap().clone()
    }

    async fn lookup_role(&self, _user_id: DbId, role: AppRole) -> Result<bool, RoleCheckError> {
        assert_eq!(role, AppRole::Admin);
        self.table_calls.fetch_add(1, Ordering::SeqCst);
        self.table.lock().unwrap().clone()
    }
}
