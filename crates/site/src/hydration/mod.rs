//! Data hydration context.
//!
//! [`SiteContent::mount`] subscribes to change notifications for every
//! content table, loads all nine tables concurrently and keeps the result in
//! a `watch` channel. Any change (or an explicit [`SiteContent::refresh`])
//! re-runs the whole batch and replaces the snapshot.

mod context;
mod snapshot;
mod source;

pub use context::{HydrationConfig, SiteContent};
pub use snapshot::{fetch_snapshot, ContentSnapshot};
pub use source::{ContentSource, SourceError};
