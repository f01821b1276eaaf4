use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::hub::RealtimeHub;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Spawn a task that pings every realtime connection until `cancel` fires.
pub fn start_heartbeat(
    hub: Arc<RealtimeHub>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let count = hub.connection_count().await;
                    tracing::debug!(count, "Realtime heartbeat ping");
                    hub.ping_all().await;
                }
            }
        }
    })
}
