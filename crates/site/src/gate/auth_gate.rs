use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use marquee_core::allow_list::AdminAllowList;
use marquee_core::routing::RouterMode;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::admin_check::{AdminCheck, DEFAULT_STEP_TIMEOUT};
use super::backend::{AuthBackend, AuthError, RoleCheck};
use super::session::{Session, SessionChange};
use super::state::{guard, login_redirect, AuthState, GuardDecision};

/// Default bound on initialization (session lookup plus the first admin
/// check), measured from mount.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct GateConfig {
    /// How long the gate may stay `Initializing` after mount. On expiry it
    /// settles as `Anonymous`, or as `AuthenticatedNonAdmin` when the session
    /// is already known but its admin check is still running.
    pub session_timeout: Duration,
    /// Bound on each remote role call of the admin check.
    pub role_check_timeout: Duration,
    /// How redirect paths are rendered.
    pub router_mode: RouterMode,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            role_check_timeout: DEFAULT_STEP_TIMEOUT,
            router_mode: RouterMode::default(),
        }
    }
}

/// State shared between the gate handle and its listener task.
struct Shared {
    backend: Arc<dyn AuthBackend>,
    roles: Arc<dyn RoleCheck>,
    check: AdminCheck,
    state: watch::Sender<AuthState>,
    /// Bumped by `sign_out`; classifications started under an older epoch
    /// are discarded.
    epoch: AtomicU64,
}

impl Shared {
    async fn classify(&self, session: Option<Session>) -> AuthState {
        let Some(session) = session else {
            return AuthState::Anonymous;
        };
        let verdict = self.check.evaluate(&*self.roles, &session.user).await;
        if verdict.is_admin {
            AuthState::AuthenticatedAdmin(session)
        } else {
            AuthState::AuthenticatedNonAdmin(session)
        }
    }

    /// Publish `next` unless a sign-out happened since `epoch` was read.
    fn publish_if_current(&self, epoch: u64, next: AuthState) -> bool {
        self.state.send_if_modified(|current| {
            if self.epoch.load(Ordering::SeqCst) != epoch || *current == next {
                return false;
            }
            *current = next;
            true
        })
    }

    fn reset_to_anonymous(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(AuthState::Anonymous);
    }
}

/// A mounted auth gate.
///
/// Owns the listener task that follows the backend's session changes.
/// Dropping the gate (or calling [`unmount`](Self::unmount)) stops it.
pub struct AuthGate {
    shared: Arc<Shared>,
    state: watch::Receiver<AuthState>,
    router_mode: RouterMode,
    cancel: CancellationToken,
    listener: Option<JoinHandle<()>>,
}

impl AuthGate {
    /// Subscribe to session changes, then look up the current session.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn mount(
        backend: Arc<dyn AuthBackend>,
        roles: Arc<dyn RoleCheck>,
        allow_list: AdminAllowList,
        config: GateConfig,
    ) -> Self {
        let changes = backend.session_changes();
        let (state_tx, state_rx) = watch::channel(AuthState::Initializing);

        let shared = Arc::new(Shared {
            backend,
            roles,
            check: AdminCheck::new(allow_list).with_step_timeout(config.role_check_timeout),
            state: state_tx,
            epoch: AtomicU64::new(0),
        });

        let cancel = CancellationToken::new();
        let listener = tokio::spawn(listen(
            Arc::clone(&shared),
            changes,
            Instant::now() + config.session_timeout,
            cancel.clone(),
        ));

        Self {
            shared,
            state: state_rx,
            router_mode: config.router_mode,
            cancel,
            listener: Some(listener),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every state transition.
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.clone()
    }

    /// Wait until the gate has left `Initializing`.
    pub async fn settled(&self) -> AuthState {
        let mut rx = self.state.clone();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    /// Sign in. The resulting state change arrives through the session
    /// listener, not from this call.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.shared.backend.sign_in(email, password).await.map(|session| {
            tracing::info!(user_id = %session.user.id, "Signed in");
        })
    }

    /// Create an account. As with `sign_in`, local state is left to the
    /// listener.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.shared.backend.sign_up(email, password).await.map(|session| {
            tracing::info!(user_id = %session.user.id, "Signed up");
        })
    }

    /// Sign out. On success the gate is `Anonymous` as soon as this returns,
    /// and any classification still in flight is discarded.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.shared.backend.sign_out().await?;
        self.shared.reset_to_anonymous();
        tracing::info!("Signed out");
        Ok(())
    }

    /// Guard decision for a protected admin view in the current state.
    pub fn guard(&self) -> GuardDecision {
        guard(&self.state.borrow(), self.router_mode)
    }

    /// Where the login view should send the visitor, if anywhere.
    pub fn login_redirect(&self) -> Option<String> {
        login_redirect(&self.state.borrow(), self.router_mode)
    }

    pub fn admin_check(&self) -> &AdminCheck {
        &self.shared.check
    }

    /// Stop the listener (and any pending session lookup) and wait for it.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(listener) = self.listener.take() {
            if let Err(e) = listener.await {
                tracing::warn!(error = %e, "Auth listener ended abnormally");
            }
        }
    }
}

impl Drop for AuthGate {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn listen(
    shared: Arc<Shared>,
    mut changes: broadcast::Receiver<SessionChange>,
    deadline: Instant,
    cancel: CancellationToken,
) {
    let epoch = shared.epoch.load(Ordering::SeqCst);
    let lookup = tokio::select! {
        _ = cancel.cancelled() => return,
        result = tokio::time::timeout_at(deadline, shared.backend.current_session()) => result,
    };
    let session = match lookup {
        Ok(Ok(session)) => session,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Initial session lookup failed, continuing as anonymous");
            None
        }
        Err(_) => {
            tracing::warn!("Initial session lookup timed out, continuing as anonymous");
            None
        }
    };
    let initial = match session {
        None => AuthState::Anonymous,
        Some(session) => {
            let classified = tokio::select! {
                _ = cancel.cancelled() => return,
                result = tokio::time::timeout_at(deadline, shared.classify(Some(session.clone()))) => result,
            };
            classified.unwrap_or_else(|_| {
                tracing::warn!(
                    user_id = %session.user.id,
                    "Initial admin check timed out, continuing as non-admin"
                );
                AuthState::AuthenticatedNonAdmin(session)
            })
        }
    };
    tracing::debug!(state = initial.label(), "Auth state settled");
    shared.publish_if_current(epoch, initial);

    loop {
        let received = tokio::select! {
            _ = cancel.cancelled() => break,
            received = changes.recv() => received,
        };

        let session = match received {
            Ok(change) => {
                tracing::debug!(event = ?change.event, "Session changed");
                change.session
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Session listener lagged, re-reading session");
                match shared.backend.current_session().await {
                    Ok(session) => session,
                    Err(e) => {
                        tracing::warn!(error = %e, "Session re-read failed");
                        None
                    }
                }
            }
            Err(RecvError::Closed) => {
                tracing::debug!("Session change stream closed");
                break;
            }
        };

        let epoch = shared.epoch.load(Ordering::SeqCst);
        let next = tokio::select! {
            _ = cancel.cancelled() => break,
            state = shared.classify(session) => state,
        };
        let label = next.label();
        if shared.publish_if_current(epoch, next) {
            tracing::info!(state = label, "Auth state changed");
        }
    }
}
