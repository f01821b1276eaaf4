use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use marquee_core::content::ContentTable;
use marquee_core::types::Timestamp;
use marquee_events::TableChange;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing frames to one connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// One realtime subscriber.
pub struct RealtimeConnection {
    /// Tables this connection asked for.
    pub tables: Vec<ContentTable>,
    pub sender: WsSender,
    pub connected_at: Timestamp,
}

/// All open realtime connections.
///
/// Designed to be wrapped in `Arc` and shared through `AppState`.
pub struct RealtimeHub {
    connections: RwLock<HashMap<String, RealtimeConnection>>,
}

impl RealtimeHub {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection and return the receiver its writer task drains.
    pub async fn add(
        &self,
        conn_id: String,
        tables: Vec<ContentTable>,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = RealtimeConnection {
            tables,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Send `change` to every connection subscribed to its table.
    ///
    /// Returns how many connections it was queued for. Closed channels are
    /// skipped; their reader loop removes them.
    pub async fn dispatch(&self, change: &TableChange) -> usize {
        let frame = match serde_json::to_string(change) {
            Ok(json) => Message::Text(json.into()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode table change");
                return 0;
            }
        };

        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.tables.contains(&change.table) && conn.sender.send(frame.clone()).is_ok() {
                count += 1;
            }
        }
        count
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then forget them all.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all realtime connections");
    }

    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}
