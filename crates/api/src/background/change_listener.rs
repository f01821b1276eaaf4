//! Postgres `LISTEN` bridge.
//!
//! Content tables carry a trigger that calls `pg_notify('content_changes',
//! json)` on every write (see the `content_change_notifications` migration). This
//! task listens on that channel and republishes each notification on the
//! [`ChangeBus`]. Whenever the listener connection is lost, every table is
//! announced as `Resync` once it is back, since notifications sent in
//! between are gone.

use std::sync::Arc;
use std::time::Duration;

use marquee_events::{ChangeBus, NotifyPayload};
use sqlx::postgres::PgListener;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Channel the change triggers notify on.
pub const CHANNEL: &str = "content_changes";

const RETRY_INITIAL: Duration = Duration::from_secs(1);
const RETRY_MAX: Duration = Duration::from_secs(30);

/// Run the listener until `cancel` is triggered.
pub async fn run(pool: PgPool, bus: Arc<ChangeBus>, cancel: CancellationToken) {
    let mut delay = RETRY_INITIAL;
    let mut connected_before = false;

    loop {
        let listener = tokio::select! {
            _ = cancel.cancelled() => break,
            result = connect(&pool) => result,
        };

        let mut listener = match listener {
            Ok(listener) => listener,
            Err(e) => {
                tracing::warn!(error = %e, retry_in_ms = delay.as_millis() as u64, "Change listener connect failed");
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
                delay = (delay * 2).min(RETRY_MAX);
                continue;
            }
        };

        delay = RETRY_INITIAL;
        if connected_before {
            bus.publish_resync_all();
        }
        connected_before = true;
        tracing::info!(channel = CHANNEL, "Change listener connected");

        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Change listener stopping");
                    return;
                }
                next = listener.try_recv() => next,
            };

            match next {
                Ok(Some(notification)) => forward(&bus, notification.payload()),
                // sqlx reconnects on the next call; anything sent meanwhile
                // was missed.
                Ok(None) => {
                    tracing::warn!("Change listener connection lost, resyncing");
                    bus.publish_resync_all();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Change listener error, reconnecting");
                    break;
                }
            }
        }
    }

    tracing::info!("Change listener stopped");
}

async fn connect(pool: &PgPool) -> Result<PgListener, sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CHANNEL).await?;
    Ok(listener)
}

/// Parse one notification payload and publish it.
fn forward(bus: &ChangeBus, payload: &str) {
    match NotifyPayload::parse(payload) {
        Ok(Some(change)) => {
            tracing::debug!(table = %change.table, kind = ?change.kind, "Content change");
            bus.publish(change);
        }
        Ok(None) => tracing::debug!(payload, "Ignoring change on untracked table"),
        Err(e) => tracing::warn!(error = %e, payload, "Malformed change notification"),
    }
}
