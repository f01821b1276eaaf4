use std::sync::Arc;

use marquee_db::DbPool;
use marquee_events::{ChangeBus, ContactNotifier};
use marquee_site::gate::AdminCheck;
use marquee_site::hydration::{HydrationConfig, SiteContent};

use crate::config::ServerConfig;
use crate::pg::{PgContentSource, PgRoleCheck};
use crate::ws::RealtimeHub;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    /// Content change notifications, fed by the Postgres listener.
    pub change_bus: Arc<ChangeBus>,
    /// The server's own hydrated snapshot, served at `/content`.
    pub content: Arc<SiteContent>,
    pub admin_check: Arc<AdminCheck>,
    pub notifier: Arc<ContactNotifier>,
    /// Realtime WebSocket connections.
    pub realtime: Arc<RealtimeHub>,
}

impl AppState {
    /// Wire up the bus, mount the content snapshot and build the admin
    /// check from configuration. Must be called inside a Tokio runtime.
    pub fn new(pool: DbPool, config: ServerConfig, notifier: ContactNotifier) -> Self {
        let change_bus = Arc::new(ChangeBus::default());
        let content = SiteContent::mount(
            Arc::new(PgContentSource::new(pool.clone())),
            &change_bus,
            HydrationConfig::default(),
        );
        let admin_check = AdminCheck::new(config.admin_emails.clone());

        Self {
            pool,
            config: Arc::new(config),
            change_bus,
            content: Arc::new(content),
            admin_check: Arc::new(admin_check),
            notifier: Arc::new(notifier),
            realtime: Arc::new(RealtimeHub::new()),
        }
    }

    /// Role checks against this state's pool.
    pub fn roles(&self) -> PgRoleCheck {
        PgRoleCheck::new(self.pool.clone())
    }
}
