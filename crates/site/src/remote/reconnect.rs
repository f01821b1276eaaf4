//! Exponential-backoff reconnection for the realtime feed.
//!
//! When the feed connection drops, [`reconnect_loop`] keeps retrying with
//! increasing delays until either a connection succeeds or the
//! [`CancellationToken`] is triggered.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Tunable parameters for the exponential-backoff strategy.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// Calculate the next backoff delay, clamped to
/// [`ReconnectConfig::max_delay`].
pub fn next_delay(current: Duration, config: &ReconnectConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// Wait, then call `connect`, backing off between failures.
///
/// Returns `Some(connection)` once `connect` succeeds, or `None` if `cancel`
/// fires first.
pub async fn reconnect_loop<C, F, T, E>(
    mut connect: C,
    config: &ReconnectConfig,
    cancel: &CancellationToken,
) -> Option<T>
where
    C: FnMut() -> F,
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return None,
            _ = tokio::time::sleep(delay) => {}
        }

        attempt += 1;
        tracing::info!(attempt, delay_ms = delay.as_millis() as u64, "Reconnecting realtime feed");

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Reconnect cancelled");
                return None;
            }
            result = connect() => match result {
                Ok(conn) => {
                    tracing::info!(attempt, "Realtime feed reconnected");
                    return Some(conn);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Reconnect attempt {attempt} failed");
                }
            }
        }

        delay = next_delay(delay, config);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn next_delay_doubles() {
        let config = ReconnectConfig::default();
        assert_eq!(next_delay(Duration::from_secs(1), &config), Duration::from_secs(2));
    }

    #[test]
    fn next_delay_clamps_at_max() {
        let config = ReconnectConfig {
            max_delay: Duration::from_secs(10),
            ..Default::default()
        };
        assert_eq!(next_delay(Duration::from_secs(8), &config), Duration::from_secs(10));
    }

    #[test]
    fn full_backoff_sequence() {
        let config = ReconnectConfig::default();
        let mut delay = config.initial_delay;
        let expected = [1, 2, 4, 8, 16, 30, 30, 30];

        for &expected_secs in &expected {
            assert_eq!(delay.as_secs(), expected_secs);
            delay = next_delay(delay, &config);
        }
    }

    #[tokio::test]
    async fn cancellation_token_stops_reconnect() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = reconnect_loop(
            || async { Err::<(), _>("refused") },
            &ReconnectConfig::default(),
            &cancel,
        )
        .await;
        assert!(result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_connect_succeeds() {
        let attempts = AtomicU32::new(0);
        let cancel = CancellationToken::new();
        let started = tokio::time::Instant::now();

        let result = reconnect_loop(
            || {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(format!("attempt {n} refused"))
                    } else {
                        Ok(n)
                    }
                }
            },
            &ReconnectConfig::default(),
            &cancel,
        )
        .await;

        assert_eq!(result, Some(3));
        // Waited 1s + 2s + 4s before the three attempts.
        assert_eq!(started.elapsed(), Duration::from_secs(7));
    }
}
