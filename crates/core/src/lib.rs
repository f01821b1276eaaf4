//! Domain vocabulary shared by every Marquee crate.
//!
//! Nothing in here performs I/O: these are the types, constants and pure
//! derivations (slugs, video embed ids, allow-list matching) that the
//! database layer, the site runtime and the HTTP server agree on.

pub mod allow_list;
pub mod contact;
pub mod content;
pub mod error;
pub mod roles;
pub mod routing;
pub mod slug;
pub mod tour;
pub mod types;
pub mod video;
