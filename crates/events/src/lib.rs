//! Change notifications and contact-form delivery.
//!
//! - [`ChangeBus`] is the in-process fan-out of [`TableChange`]s, backed by
//!   `tokio::sync::broadcast`. The server feeds it from Postgres
//!   notifications; the remote client feeds it from the WebSocket feed.
//! - [`TableSubscription`] is a per-table view of the bus that turns
//!   broadcast lag into a `Resync`.
//! - [`delivery`] sends contact-form notifications over SMTP or an HTTP
//!   email API.

pub mod bus;
pub mod delivery;

pub use bus::{ChangeBus, NotifyPayload, TableChange, TableSubscription};
pub use delivery::email::{SmtpConfig, SmtpDelivery};
pub use delivery::email_api::{EmailApiConfig, EmailApiDelivery};
pub use delivery::{ContactNotifier, EmailError};
