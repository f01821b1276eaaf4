//! HTTP and WebSocket implementations of the site's backend traits.
//!
//! [`RemoteBackend`] talks to the `/api/v1` REST surface and implements
//! [`ContentSource`](crate::hydration::ContentSource),
//! [`AuthBackend`](crate::gate::AuthBackend) and
//! [`RoleCheck`](crate::gate::RoleCheck). [`RemoteChangeFeed`] follows the
//! realtime WebSocket and republishes its frames on a local
//! [`ChangeBus`](marquee_events::ChangeBus).

mod backend;
mod feed;
pub mod reconnect;

pub use backend::RemoteBackend;
pub use feed::{realtime_url, FeedError, RemoteChangeFeed};
