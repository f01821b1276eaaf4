//! Bus-to-hub relay.

use std::sync::Arc;

use marquee_core::content::ContentTable;
use marquee_events::TableChange;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use super::hub::RealtimeHub;

/// Forward every change from the bus to the realtime hub until `cancel`
/// fires or the bus closes.
///
/// If the relay falls behind it sends a `Resync` for every table, since the
/// skipped changes are gone.
pub async fn run(
    hub: Arc<RealtimeHub>,
    mut changes: broadcast::Receiver<TableChange>,
    cancel: CancellationToken,
) {
    tracing::info!("Realtime relay started");

    loop {
        let received = tokio::select! {
            _ = cancel.cancelled() => break,
            received = changes.recv() => received,
        };

        match received {
            Ok(change) => {
                let sent = hub.dispatch(&change).await;
                tracing::trace!(table = %change.table, sent, "Relayed change");
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Realtime relay lagged, sending resync");
                for table in ContentTable::ALL {
                    hub.dispatch(&TableChange::resync(table)).await;
                }
            }
            Err(RecvError::Closed) => break,
        }
    }

    tracing::info!("Realtime relay stopped");
}
