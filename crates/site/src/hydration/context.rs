use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, SelectAll, StreamExt};
use marquee_core::content::ContentTable;
use marquee_events::bus::{ChangeBus, TableChange};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::snapshot::{fetch_snapshot, ContentSnapshot};
use super::source::ContentSource;

/// Tuning for a [`SiteContent`] instance.
#[derive(Debug, Clone, Default)]
pub struct HydrationConfig {
    /// When set, notifications arriving within this window after the first
    /// one are coalesced into a single re-fetch. `None` re-fetches once per
    /// notification.
    pub debounce: Option<Duration>,
}

/// A mounted hydration context.
///
/// Owns the driver task that loads and reloads content. The snapshot can
/// only be read through a mounted instance; dropping it (or calling
/// [`unmount`](Self::unmount)) stops the driver and releases every change
/// subscription.
pub struct SiteContent {
    state: watch::Receiver<Arc<ContentSnapshot>>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
    driver: Option<JoinHandle<()>>,
}

impl SiteContent {
    /// Subscribe to every content table on `bus` and start loading.
    ///
    /// Subscriptions are opened before this returns, so changes published
    /// after `mount` are never missed. Must be called inside a Tokio runtime.
    pub fn mount<S>(source: Arc<S>, bus: &ChangeBus, config: HydrationConfig) -> Self
    where
        S: ContentSource + ?Sized,
    {
        let changes: SelectAll<BoxStream<'static, TableChange>> = stream::select_all(
            ContentTable::ALL
                .into_iter()
                .map(|table| bus.subscribe_table(table).into_stream().boxed()),
        );

        let (state_tx, state_rx) = watch::channel(Arc::new(ContentSnapshot::loading()));
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let driver = tokio::spawn(drive(
            source,
            changes,
            Arc::clone(&refresh),
            state_tx,
            config,
            cancel.clone(),
        ));

        Self {
            state: state_rx,
            refresh,
            cancel,
            driver: Some(driver),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<ContentSnapshot> {
        Arc::clone(&self.state.borrow())
    }

    /// A receiver that observes every snapshot replacement.
    pub fn watch(&self) -> watch::Receiver<Arc<ContentSnapshot>> {
        self.state.clone()
    }

    /// Wait for the first batch to complete and return its snapshot.
    pub async fn loaded(&self) -> Arc<ContentSnapshot> {
        let mut rx = self.state.clone();
        let loaded = match rx.wait_for(|snapshot| !snapshot.loading).await {
            Ok(snapshot) => Arc::clone(&snapshot),
            Err(_) => self.snapshot(),
        };
        loaded
    }

    /// Request a full re-fetch. Requests made while one is pending collapse
    /// into one.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop the driver and wait for it to exit.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(driver) = self.driver.take() {
            if let Err(e) = driver.await {
                tracing::warn!(error = %e, "Hydration driver ended abnormally");
            }
        }
    }
}

impl Drop for SiteContent {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// What woke the driver up.
enum Trigger {
    Change(TableChange),
    Refresh,
}

async fn drive<S>(
    source: Arc<S>,
    mut changes: SelectAll<BoxStream<'static, TableChange>>,
    refresh: Arc<Notify>,
    state: watch::Sender<Arc<ContentSnapshot>>,
    config: HydrationConfig,
    cancel: CancellationToken,
) where
    S: ContentSource + ?Sized,
{
    let mut generation = 1;
    let initial = tokio::select! {
        _ = cancel.cancelled() => return,
        snapshot = fetch_snapshot(&*source, generation) => snapshot,
    };
    tracing::debug!(failed = initial.failed_tables.len(), "Initial content loaded");
    state.send_replace(Arc::new(initial));

    let mut changes_open = true;
    loop {
        let trigger = tokio::select! {
            _ = cancel.cancelled() => break,
            _ = refresh.notified() => Trigger::Refresh,
            change = changes.next(), if changes_open => match change {
                Some(change) => Trigger::Change(change),
                None => {
                    tracing::debug!("Change bus closed, only explicit refreshes remain");
                    changes_open = false;
                    continue;
                }
            },
        };

        match &trigger {
            Trigger::Change(change) => {
                tracing::debug!(table = %change.table, kind = ?change.kind, "Content changed, re-fetching");
            }
            Trigger::Refresh => tracing::debug!("Explicit content refresh"),
        }

        if let Some(window) = config.debounce {
            let deadline = tokio::time::sleep(window);
            tokio::pin!(deadline);
            loop {
                tokio::select! {
                    _ = &mut deadline => break,
                    _ = cancel.cancelled() => return,
                    Some(_) = changes.next(), if changes_open => continue,
                }
            }
        }

        generation += 1;
        let snapshot = tokio::select! {
            _ = cancel.cancelled() => break,
            snapshot = fetch_snapshot(&*source, generation) => snapshot,
        };
        state.send_replace(Arc::new(snapshot));
    }

    tracing::debug!("Hydration driver stopped");
}
