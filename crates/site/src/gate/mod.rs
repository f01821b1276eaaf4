//! Auth/session gate.
//!
//! [`AuthGate`] turns the backend's session stream into an [`AuthState`]:
//! `Initializing` until the first session lookup settles (or times out),
//! then `Anonymous`, `AuthenticatedNonAdmin` or `AuthenticatedAdmin`.
//! Admin status comes from an [`AdminCheck`] chain: allow-list, then the
//! role-check procedure, then a direct role-table lookup, failing closed.

mod admin_check;
mod auth_gate;
mod backend;
mod session;
mod state;

pub use admin_check::{AdminCheck, CheckStep, Verdict};
pub use auth_gate::{AuthGate, GateConfig};
pub use backend::{AuthBackend, AuthError, RoleCheck, RoleCheckError};
pub use session::{AuthEvent, AuthResponse, Session, SessionChange, SessionUser};
pub use state::{guard, login_redirect, AuthState, GuardDecision};
