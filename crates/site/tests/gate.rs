mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use common::{FakeAuth, FakeRoles, GOOD_PASSWORD};
use marquee_core::allow_list::AdminAllowList;
use marquee_core::routing::{RouterMode, ADMIN_DASHBOARD_PATH, ADMIN_LOGIN_PATH};
use marquee_site::gate::{
    AdminCheck, AuthError, AuthGate, AuthState, CheckStep, GateConfig, GuardDecision,
    RoleCheckError, SessionUser,
};
use tokio::sync::Notify;
use tokio::time::Instant;

const ADMIN: &str = "boss@example.com";
const FAN: &str = "fan@example.com";

fn allow_list() -> AdminAllowList {
    AdminAllowList::parse(ADMIN)
}

fn mount(auth: &Arc<FakeAuth>, roles: &Arc<FakeRoles>) -> AuthGate {
    AuthGate::mount(
        Arc::clone(auth) as _,
        Arc::clone(roles) as _,
        allow_list(),
        GateConfig::default(),
    )
}

async fn wait_for_state(gate: &AuthGate, pred: impl FnMut(&AuthState) -> bool) -> AuthState {
    let mut rx = gate.watch();
    let state = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(pred))
        .await
        .expect("state not reached in time")
        .expect("gate listener stopped");
    state.clone()
}

fn user(auth: &FakeAuth, email: &str) -> SessionUser {
    SessionUser {
        id: auth.user_id(email),
        email: email.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Gate lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_session_settles_anonymous() {
    let auth = Arc::new(FakeAuth::new(&[FAN]));
    let roles = Arc::new(FakeRoles::broken());
    let gate = mount(&auth, &roles);

    assert_eq!(gate.settled().await, AuthState::Anonymous);
    assert_eq!(
        gate.guard(),
        GuardDecision::RedirectToLogin(RouterMode::Browser.href(ADMIN_LOGIN_PATH))
    );
    assert_eq!(gate.login_redirect(), None);
    assert_eq!(roles.rpc_calls(), 0);
}

#[tokio::test]
async fn hash_router_renders_hash_redirects() {
    let auth = Arc::new(FakeAuth::new(&[FAN]));
    let roles = Arc::new(FakeRoles::broken());
    let gate = AuthGate::mount(
        auth,
        roles,
        allow_list(),
        GateConfig {
            router_mode: RouterMode::Hash,
            ..GateConfig::default()
        },
    );

    gate.settled().await;
    assert_eq!(
        gate.guard(),
        GuardDecision::RedirectToLogin(RouterMode::Hash.href(ADMIN_LOGIN_PATH))
    );
}

#[tokio::test(start_paused = true)]
async fn slow_session_lookup_settles_anonymous() {
    let mut auth = FakeAuth::new(&[FAN]).signed_in(FAN);
    auth.session_delay = Some(Duration::from_secs(60));
    let auth = Arc::new(auth);
    let roles = Arc::new(FakeRoles::answering(Ok(true), Ok(true)));

    let started = Instant::now();
    let gate = mount(&auth, &roles);
    assert!(gate.state().is_loading());
    assert_eq!(gate.guard(), GuardDecision::Loading);

    assert_eq!(gate.settled().await, AuthState::Anonymous);
    let waited = started.elapsed();
    assert!(waited >= Duration::from_secs(5), "{waited:?}");
    assert!(waited < Duration::from_secs(60), "{waited:?}");
}

#[tokio::test(start_paused = true)]
async fn slow_admin_check_settles_within_session_timeout() {
    let mut auth = FakeAuth::new(&[FAN]).signed_in(FAN);
    auth.session_delay = Some(Duration::from_secs(3));
    let auth = Arc::new(auth);
    let mut roles = FakeRoles::answering(Ok(true), Ok(true));
    roles.rpc_gate = Some(Arc::new(Notify::new()));
    let roles = Arc::new(roles);

    let started = Instant::now();
    let gate = mount(&auth, &roles);

    let settled = gate.settled().await;
    let waited = started.elapsed();
    assert_matches!(settled, AuthState::AuthenticatedNonAdmin(ref s) if s.user.email == FAN);
    assert_eq!(waited, Duration::from_secs(5));
    assert_eq!(roles.rpc_calls(), 1);
    assert_eq!(roles.table_calls(), 0);
    assert_eq!(gate.guard(), GuardDecision::Denied);
}

#[tokio::test]
async fn existing_non_admin_session_is_denied() {
    let auth = Arc::new(FakeAuth::new(&[FAN]).signed_in(FAN));
    let roles = Arc::new(FakeRoles::answering(Ok(false), Ok(true)));
    let gate = mount(&auth, &roles);

    let state = gate.settled().await;
    assert_matches!(state, AuthState::AuthenticatedNonAdmin(ref s) if s.user.email == FAN);
    assert_eq!(gate.guard(), GuardDecision::Denied);
    assert_eq!(roles.rpc_calls(), 1);
    assert_eq!(roles.table_calls(), 0);
}

#[tokio::test]
async fn allow_listed_email_is_admin_without_role_calls() {
    let auth = Arc::new(FakeAuth::new(&[ADMIN]).signed_in(ADMIN));
    let roles = Arc::new(FakeRoles::broken());
    let gate = mount(&auth, &roles);

    assert!(gate.settled().await.is_admin());
    assert_eq!(gate.guard(), GuardDecision::Allow);
    assert_eq!(
        gate.login_redirect(),
        Some(RouterMode::Browser.href(ADMIN_DASHBOARD_PATH))
    );
    assert_eq!(roles.rpc_calls(), 0);
    assert_eq!(roles.table_calls(), 0);
}

#[tokio::test]
async fn failing_role_checks_fail_closed() {
    let auth = Arc::new(FakeAuth::new(&[FAN]).signed_in(FAN));
    let roles = Arc::new(FakeRoles::broken());
    let gate = mount(&auth, &roles);

    assert_matches!(gate.settled().await, AuthState::AuthenticatedNonAdmin(_));
    assert_eq!(roles.rpc_calls(), 1);
    assert_eq!(roles.table_calls(), 1);
}

#[tokio::test]
async fn sign_in_transitions_to_non_admin() {
    let auth = Arc::new(FakeAuth::new(&[FAN]));
    let roles = Arc::new(FakeRoles::answering(Ok(false), Ok(false)));
    let gate = mount(&auth, &roles);
    gate.settled().await;

    gate.sign_in(FAN, GOOD_PASSWORD).await.unwrap();

    let state = wait_for_state(&gate, |s| s.session().is_some()).await;
    assert_matches!(state, AuthState::AuthenticatedNonAdmin(_));
    assert_eq!(gate.guard(), GuardDecision::Denied);
}

#[tokio::test]
async fn sign_in_as_role_admin_allows_admin_views() {
    let auth = Arc::new(FakeAuth::new(&[FAN]));
    let roles = Arc::new(FakeRoles::answering(Ok(true), Ok(false)));
    let gate = mount(&auth, &roles);
    gate.settled().await;

    gate.sign_in(FAN, GOOD_PASSWORD).await.unwrap();

    wait_for_state(&gate, AuthState::is_admin).await;
    assert_eq!(gate.guard(), GuardDecision::Allow);
}

#[tokio::test]
async fn wrong_password_is_reported_and_state_kept() {
    let auth = Arc::new(FakeAuth::new(&[FAN]));
    let roles = Arc::new(FakeRoles::broken());
    let gate = mount(&auth, &roles);
    gate.settled().await;

    let err = gate.sign_in(FAN, "wrong").await.unwrap_err();

    assert_eq!(err, AuthError::InvalidCredentials);
    assert_eq!(gate.state(), AuthState::Anonymous);
}

#[tokio::test]
async fn sign_out_is_anonymous_on_return() {
    let auth = Arc::new(FakeAuth::new(&[ADMIN]).signed_in(ADMIN));
    let roles = Arc::new(FakeRoles::broken());
    let gate = mount(&auth, &roles);
    assert!(gate.settled().await.is_admin());

    gate.sign_out().await.unwrap();

    assert_eq!(gate.state(), AuthState::Anonymous);
    assert_matches!(gate.guard(), GuardDecision::RedirectToLogin(_));
}

#[tokio::test]
async fn failed_sign_out_keeps_session() {
    let mut auth = FakeAuth::new(&[ADMIN]).signed_in(ADMIN);
    auth.fail_sign_out = true;
    let auth = Arc::new(auth);
    let roles = Arc::new(FakeRoles::broken());
    let gate = mount(&auth, &roles);
    gate.settled().await;

    assert_matches!(gate.sign_out().await, Err(AuthError::Unavailable(_)));
    assert!(gate.state().is_admin());
}

#[tokio::test]
async fn sign_out_discards_in_flight_classification() {
    let auth = Arc::new(FakeAuth::new(&[FAN]));
    let release = Arc::new(Notify::new());
    let mut roles = FakeRoles::answering(Ok(true), Ok(true));
    roles.rpc_gate = Some(Arc::clone(&release));
    let roles = Arc::new(roles);
    let gate = mount(&auth, &roles);
    gate.settled().await;

    gate.sign_in(FAN, GOOD_PASSWORD).await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), async {
        while roles.rpc_calls() == 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("classification never started");

    gate.sign_out().await.unwrap();
    assert_eq!(gate.state(), AuthState::Anonymous);

    release.notify_one();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(gate.state(), AuthState::Anonymous);
}

#[tokio::test]
async fn unmount_stops_listening() {
    let auth = Arc::new(FakeAuth::new(&[FAN]));
    let roles = Arc::new(FakeRoles::broken());
    let gate = mount(&auth, &roles);
    gate.settled().await;
    assert_eq!(auth.listener_count(), 1);

    gate.unmount().await;

    assert_eq!(auth.listener_count(), 0);
}

// ---------------------------------------------------------------------------
// AdminCheck chain
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rpc_failure_falls_back_to_role_table() {
    let auth = FakeAuth::new(&[FAN]);
    let roles = FakeRoles::answering(
        Err(RoleCheckError::Backend("function missing".to_string())),
        Ok(true),
    );
    let check = AdminCheck::new(allow_list());

    let verdict = check.evaluate(&roles, &user(&auth, FAN)).await;

    assert!(verdict.is_admin);
    assert_eq!(verdict.decided_by, Some(CheckStep::RoleTable));
}

#[tokio::test]
async fn unlisted_email_falls_through_to_rpc() {
    let auth = FakeAuth::new(&[FAN]);
    let roles = FakeRoles::answering(Ok(false), Ok(true));
    let check = AdminCheck::new(allow_list());

    let verdict = check.evaluate(&roles, &user(&auth, FAN)).await;

    assert!(!verdict.is_admin);
    assert_eq!(verdict.decided_by, Some(CheckStep::RoleRpc));
}

#[tokio::test]
async fn exhausted_chain_has_no_deciding_step() {
    let auth = FakeAuth::new(&[FAN]);
    let check = AdminCheck::new(allow_list());

    let verdict = check.evaluate(&FakeRoles::broken(), &user(&auth, FAN)).await;

    assert!(!verdict.is_admin);
    assert_eq!(verdict.decided_by, None);
}

#[tokio::test(start_paused = true)]
async fn hung_rpc_times_out_and_falls_through() {
    let auth = FakeAuth::new(&[FAN]);
    let mut roles = FakeRoles::answering(Ok(true), Ok(false));
    roles.rpc_gate = Some(Arc::new(Notify::new()));
    let check = AdminCheck::new(allow_list()).with_step_timeout(Duration::from_secs(1));

    let started = Instant::now();
    let verdict = check.evaluate(&roles, &user(&auth, FAN)).await;

    assert!(started.elapsed() >= Duration::from_secs(1));
    assert!(!verdict.is_admin);
    assert_eq!(verdict.decided_by, Some(CheckStep::RoleTable));
}

#[tokio::test]
async fn custom_step_order_is_respected() {
    let auth = FakeAuth::new(&[FAN]);
    let roles = FakeRoles::answering(Ok(true), Ok(false));
    let check = AdminCheck::with_steps(allow_list(), vec![CheckStep::RoleTable]);

    let verdict = check.evaluate(&roles, &user(&auth, FAN)).await;

    assert!(!verdict.is_admin);
    assert_eq!(roles.rpc_calls(), 0);
}
