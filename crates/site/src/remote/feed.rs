use std::sync::Arc;

use futures::StreamExt;
use marquee_core::content::ContentTable;
use marquee_events::bus::{ChangeBus, TableChange};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use super::reconnect::{reconnect_loop, ReconnectConfig};

type FeedStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Connection error: {0}")]
    Connection(String),
}

/// The realtime endpoint for a server origin and a set of tables.
///
/// ```
/// use marquee_core::content::ContentTable;
/// use marquee_site::remote::realtime_url;
///
/// assert_eq!(
///     realtime_url("https://site.example.com", &[ContentTable::Projects, ContentTable::Videos]),
///     "wss://site.example.com/api/v1/realtime?tables=projects,videos",
/// );
/// ```
pub fn realtime_url(base_url: &str, tables: &[ContentTable]) -> String {
    let base = base_url.trim_end_matches('/');
    let origin = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    let tables: Vec<&str> = tables.iter().map(|t| t.table_name()).collect();
    format!("{origin}/api/v1/realtime?tables={}", tables.join(","))
}

/// Follows the server's realtime WebSocket and republishes every
/// [`TableChange`] frame on a local [`ChangeBus`].
///
/// After any reconnect it publishes a `Resync` for every content table,
/// because changes made while disconnected were never seen.
pub struct RemoteChangeFeed {
    url: String,
    bus: Arc<ChangeBus>,
    reconnect: ReconnectConfig,
}

impl RemoteChangeFeed {
    pub fn new(base_url: &str, tables: &[ContentTable], bus: Arc<ChangeBus>) -> Self {
        Self {
            url: realtime_url(base_url, tables),
            bus,
            reconnect: ReconnectConfig::default(),
        }
    }

    pub fn with_reconnect(mut self, config: ReconnectConfig) -> Self {
        self.reconnect = config;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }

    /// Connect, pump frames, and reconnect until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        let first = tokio::select! {
            _ = cancel.cancelled() => return,
            result = self.connect() => result,
        };
        let mut stream = match first {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "Realtime feed unavailable");
                match reconnect_loop(|| self.connect(), &self.reconnect, &cancel).await {
                    Some(stream) => {
                        self.bus.publish_resync_all();
                        stream
                    }
                    None => return,
                }
            }
        };

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    let _ = stream.close(None).await;
                    break;
                }
                _ = self.pump(&mut stream) => {
                    tracing::info!(url = %self.url, "Realtime feed disconnected");
                }
            }

            match reconnect_loop(|| self.connect(), &self.reconnect, &cancel).await {
                Some(reconnected) => {
                    stream = reconnected;
                    self.bus.publish_resync_all();
                }
                None => break,
            }
        }

        tracing::debug!(url = %self.url, "Realtime feed stopped");
    }

    async fn connect(&self) -> Result<FeedStream, FeedError> {
        let (stream, _response) = connect_async(self.url.as_str())
            .await
            .map_err(|e| FeedError::Connection(format!("{}: {e}", self.url)))?;
        tracing::info!(url = %self.url, "Realtime feed connected");
        Ok(stream)
    }

    /// Read frames until the socket closes or errors.
    async fn pump(&self, stream: &mut FeedStream) {
        while let Some(frame) = stream.next().await {
            match frame {
                Ok(Message::Text(text)) => self.handle_text(&text),
                Ok(Message::Close(frame)) => {
                    tracing::info!(?frame, "Realtime feed closed by server");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Realtime feed receive error");
                    break;
                }
            }
        }
    }

    fn handle_text(&self, text: &str) {
        match serde_json::from_str::<TableChange>(text) {
            Ok(change) => {
                tracing::trace!(table = %change.table, kind = ?change.kind, "Realtime change");
                self.bus.publish(change);
            }
            Err(e) => tracing::warn!(error = %e, "Ignoring malformed realtime frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_origin_maps_to_ws() {
        assert_eq!(
            realtime_url("http://localhost:3000/", &ContentTable::ALL[..1]),
            "ws://localhost:3000/api/v1/realtime?tables=site_settings"
        );
    }

    #[test]
    fn malformed_frames_are_ignored() {
        let bus = Arc::new(ChangeBus::default());
        let mut rx = bus.subscribe();
        let feed = RemoteChangeFeed::new("http://localhost:3000", &ContentTable::ALL, Arc::clone(&bus));

        feed.handle_text("{\"not\":\"a change\"}");
        assert!(rx.try_recv().is_err());

        let change = TableChange::resync(ContentTable::Videos);
        feed.handle_text(&serde_json::to_string(&change).unwrap());
        assert_eq!(rx.try_recv().unwrap().table, ContentTable::Videos);
    }
}
