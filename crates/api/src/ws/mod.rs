//! Realtime WebSocket feed.
//!
//! Clients connect to `/api/v1/realtime?tables=a,b` and receive one JSON
//! [`TableChange`](marquee_events::TableChange) text frame per change to a
//! table they asked for. [`relay`] moves changes from the bus to the
//! [`RealtimeHub`]; [`start_heartbeat`] keeps idle connections alive.

mod handler;
mod heartbeat;
pub mod hub;
pub mod relay;

pub use handler::realtime_handler;
pub use heartbeat::start_heartbeat;
pub use hub::RealtimeHub;
