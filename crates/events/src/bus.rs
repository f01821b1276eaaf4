//! In-process change bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`ChangeBus`] is shared via `Arc<ChangeBus>` between whatever produces
//! change notifications (the Postgres listener, the WebSocket feed client)
//! and whatever consumes them (the hydration context, WebSocket sessions).

use chrono::Utc;
use futures::stream::{self, Stream};
use marquee_core::content::{ChangeKind, ContentTable};
use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

// ---------------------------------------------------------------------------
// TableChange
// ---------------------------------------------------------------------------

/// A change to one row of a content table, or a `Resync` for the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableChange {
    pub table: ContentTable,
    pub kind: ChangeKind,
    /// The affected row. Always `None` for `Resync`.
    pub row_id: Option<DbId>,
    pub at: Timestamp,
}

impl TableChange {
    pub fn new(table: ContentTable, kind: ChangeKind) -> Self {
        Self {
            table,
            kind,
            row_id: None,
            at: Utc::now(),
        }
    }

    /// A synthetic "notifications may have been missed" change.
    pub fn resync(table: ContentTable) -> Self {
        Self::new(table, ChangeKind::Resync)
    }

    pub fn with_row(mut self, row_id: DbId) -> Self {
        self.row_id = Some(row_id);
        self
    }
}

/// The JSON payload the content triggers send on the `content_changes`
/// channel: `{"table": "...", "op": "INSERT", "id": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyPayload {
    pub table: String,
    pub op: String,
    pub id: Option<DbId>,
}

impl NotifyPayload {
    /// Decode a raw notification payload.
    ///
    /// Returns `Ok(None)` for tables or operations the site does not hydrate
    /// from, so the listener can skip them quietly.
    pub fn parse(raw: &str) -> Result<Option<TableChange>, serde_json::Error> {
        let payload: NotifyPayload = serde_json::from_str(raw)?;
        Ok(payload.into_change())
    }

    pub fn into_change(self) -> Option<TableChange> {
        let table = ContentTable::from_table_name(&self.table)?;
        let kind = ChangeKind::from_trigger_op(&self.op)?;
        let change = TableChange::new(table, kind);
        Some(match self.id {
            Some(id) => change.with_row(id),
            None => change,
        })
    }
}

// ---------------------------------------------------------------------------
// ChangeBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out of table changes.
///
/// ```rust
/// use marquee_core::content::{ChangeKind, ContentTable};
/// use marquee_events::bus::{ChangeBus, TableChange};
///
/// let bus = ChangeBus::default();
/// let _rx = bus.subscribe();
///
/// bus.publish(TableChange::new(ContentTable::Projects, ChangeKind::Insert));
/// ```
pub struct ChangeBus {
    sender: broadcast::Sender<TableChange>,
}

impl ChangeBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed changes are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change to all current subscribers.
    ///
    /// With no subscribers the change is dropped.
    pub fn publish(&self, change: TableChange) {
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(change);
    }

    /// Publish a `Resync` for every content table.
    pub fn publish_resync_all(&self) {
        for table in ContentTable::ALL {
            self.publish(TableChange::resync(table));
        }
    }

    /// Subscribe to every change on the bus.
    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.sender.subscribe()
    }

    /// Subscribe to changes of a single table.
    pub fn subscribe_table(&self, table: ContentTable) -> TableSubscription {
        self.subscribe_tables(&[table])
    }

    /// Subscribe to changes of a set of tables.
    pub fn subscribe_tables(&self, tables: &[ContentTable]) -> TableSubscription {
        TableSubscription {
            receiver: self.sender.subscribe(),
            tables: tables.to_vec(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// TableSubscription
// ---------------------------------------------------------------------------

/// A filtered receiver that yields only changes to its tables.
///
/// Dropping the subscription unsubscribes.
pub struct TableSubscription {
    receiver: broadcast::Receiver<TableChange>,
    tables: Vec<ContentTable>,
}

impl TableSubscription {
    pub fn tables(&self) -> &[ContentTable] {
        &self.tables
    }

    /// Wait for the next change to one of the subscribed tables.
    ///
    /// If the receiver fell behind, returns a `Resync` for the first
    /// subscribed table instead of the dropped changes. Returns `None` once
    /// the bus is gone.
    pub async fn recv(&mut self) -> Option<TableChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) if self.tables.contains(&change.table) => return Some(change),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    let table = self.tables.first().copied()?;
                    tracing::warn!(%table, skipped, "Change subscription lagged, resyncing");
                    return Some(TableChange::resync(table));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Turn the subscription into a stream of changes.
    pub fn into_stream(self) -> impl Stream<Item = TableChange> + Send + 'static {
        stream::unfold(self, |mut sub| async move {
            let change = sub.recv().await?;
            Some((change, sub))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use futures::StreamExt;

    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = ChangeBus::default();
        let mut rx = bus.subscribe();

        let id = DbId::new_v4();
        bus.publish(TableChange::new(ContentTable::Videos, ChangeKind::Update).with_row(id));

        let received = rx.recv().await.expect("should receive the change");
        assert_eq!(received.table, ContentTable::Videos);
        assert_eq!(received.kind, ChangeKind::Update);
        assert_eq!(received.row_id, Some(id));
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = ChangeBus::default();
        bus.publish(TableChange::resync(ContentTable::NavLinks));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn table_subscription_filters_other_tables() {
        let bus = ChangeBus::default();
        let mut sub = bus.subscribe_table(ContentTable::TourDates);

        bus.publish(TableChange::new(ContentTable::Projects, ChangeKind::Insert));
        bus.publish(TableChange::new(ContentTable::TourDates, ChangeKind::Delete));

        let change = sub.recv().await.unwrap();
        assert_eq!(change.table, ContentTable::TourDates);
        assert_eq!(change.kind, ChangeKind::Delete);
    }

    #[tokio::test]
    async fn lagged_subscription_yields_resync() {
        let bus = ChangeBus::new(2);
        let mut sub = bus.subscribe_table(ContentTable::Projects);

        for _ in 0..5 {
            bus.publish(TableChange::new(ContentTable::Projects, ChangeKind::Insert));
        }

        let change = sub.recv().await.unwrap();
        assert_eq!(change.kind, ChangeKind::Resync);
        assert_eq!(change.table, ContentTable::Projects);
    }

    #[tokio::test]
    async fn subscription_ends_when_bus_dropped() {
        let bus = ChangeBus::default();
        let mut sub = bus.subscribe_table(ContentTable::Videos);
        drop(bus);
        assert_matches!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn resync_all_reaches_every_table_stream() {
        let bus = ChangeBus::default();
        let stream = bus.subscribe_tables(&ContentTable::ALL).into_stream();
        bus.publish_resync_all();

        let changes: Vec<TableChange> = stream.take(ContentTable::ALL.len()).collect().await;
        let tables: Vec<ContentTable> = changes.iter().map(|c| c.table).collect();
        assert_eq!(tables, ContentTable::ALL.to_vec());
        assert!(changes.iter().all(|c| c.kind == ChangeKind::Resync));
    }

    #[test]
    fn notify_payload_maps_to_change() {
        let id = DbId::new_v4();
        let raw = format!(r#"{{"table":"projects","op":"UPDATE","id":"{id}"}}"#);
        let change = NotifyPayload::parse(&raw).unwrap().unwrap();
        assert_eq!(change.table, ContentTable::Projects);
        assert_eq!(change.kind, ChangeKind::Update);
        assert_eq!(change.row_id, Some(id));
    }

    #[test]
    fn notify_payload_for_unknown_table_is_skipped() {
        let raw = r#"{"table":"contact_submissions","op":"INSERT","id":null}"#;
        assert_matches!(NotifyPayload::parse(raw), Ok(None));
        assert!(NotifyPayload::parse("not json").is_err());
    }

    #[test]
    fn table_change_serializes_with_table_name() {
        let change = TableChange::resync(ContentTable::FooterSettings);
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["table"], "footer_settings");
        assert_eq!(json["kind"], "resync");
        assert!(json["row_id"].is_null());
    }
}
