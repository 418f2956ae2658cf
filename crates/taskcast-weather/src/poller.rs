//! Scheduled, cancellable repeating fetch.
//!
//! `start` fetches immediately and then on a fixed interval until the
//! returned handle is stopped or dropped. There is no retry within a tick;
//! a failed fetch waits for the next scheduled one.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::provider::WeatherProvider;
use crate::state::WeatherState;

/// Default refresh cadence: 30 minutes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

pub struct WeatherPoller<P> {
    provider: P,
    interval: Duration,
    state: Arc<RwLock<WeatherState>>,
}

impl<P: WeatherProvider> WeatherPoller<P> {
    pub fn new(provider: P, interval: Duration) -> Self {
        Self {
            provider,
            interval,
            state: Arc::new(RwLock::new(WeatherState::default())),
        }
    }

    /// Shared view of the observable state; valid before and after `start`.
    pub fn watch_state(&self) -> Arc<RwLock<WeatherState>> {
        self.state.clone()
    }

    /// Spawn the fetch loop and hand ownership of the timer to the handle.
    ///
    /// The first fetch fires immediately; subsequent fetches fire every
    /// `interval`. After the handle is stopped no further state mutation
    /// happens, even if a fetch was in flight.
    pub fn start(self) -> PollerHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let state = self.state.clone();
        let provider = self.provider;
        let interval = self.interval;

        tracing::info!("Starting weather poller (every {:?})", interval);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                state.write().begin_fetch();

                // Racing the fetch against cancellation discards an
                // in-flight result once the poller has been stopped.
                let result = tokio::select! {
                    _ = token.cancelled() => break,
                    result = provider.fetch() => result,
                };

                match result {
                    Ok(snapshot) => state.write().resolve(snapshot),
                    Err(e) => state.write().reject(e.to_string()),
                }
            }
            tracing::debug!("Weather poller loop exited");
        });

        PollerHandle {
            cancel,
            task,
            state: self.state,
        }
    }
}

/// Owns the running poller's timer and cancellation token.
///
/// Dropping the handle cancels the loop, so teardown cannot leak the timer.
pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
    state: Arc<RwLock<WeatherState>>,
}

impl PollerHandle {
    /// Current state, cloned out of the shared cell.
    pub fn state(&self) -> WeatherState {
        self.state.read().clone()
    }

    /// Shared view of the observable state.
    pub fn watch_state(&self) -> Arc<RwLock<WeatherState>> {
        self.state.clone()
    }

    /// Cancel the recurring timer. Idempotent.
    pub fn stop(&self) {
        tracing::info!("Stopping weather poller");
        self.cancel.cancel();
    }

    /// Cancel and wait for the loop task to finish.
    pub async fn stopped(mut self) {
        self.cancel.cancel();
        let _ = (&mut self.task).await;
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
