//! The live content runtime of the site.
//!
//! - [`hydration`]: one owned snapshot of every content table, loaded with a
//!   single concurrent batch and re-loaded wholesale whenever a change
//!   notification arrives.
//! - [`gate`]: classifies the current session as anonymous, authenticated
//!   non-admin or authenticated admin, and decides whether admin views may
//!   render.
//! - [`remote`]: HTTP and WebSocket implementations of the backend traits
//!   both of the above are generic over.

pub mod gate;
pub mod hydration;
pub mod remote;

pub use gate::{AuthGate, AuthState, GateConfig, GuardDecision};
pub use hydration::{ContentSnapshot, ContentSource, HydrationConfig, SiteContent, SourceError};
pub use remote::{RemoteBackend, RemoteChangeFeed};
