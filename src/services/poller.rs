//! Background polling loop.
//!
//! Fetches a fresh sample at startup, on a fixed interval, and immediately
//! when an on-demand refresh is signalled. Each successful fetch replaces
//! the sample wholesale; a failed fetch logs and leaves the previous sample
//! in place.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::services::HostClient;
use crate::stats::{StatsFeed, TransmissionSample};

/// Polls the printer host and publishes samples into the feed.
pub struct Poller {
    client: Arc<HostClient>,
    feed: StatsFeed,
    refresh: Arc<Notify>,
    interval: Duration,
}

impl Poller {
    pub fn new(
        client: Arc<HostClient>,
        feed: StatsFeed,
        refresh: Arc<Notify>,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            feed,
            refresh,
            interval,
        }
    }

    /// Spawn the polling loop onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Transmission stats poller started"
        );

        // The first tick fires immediately, covering the startup fetch.
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.refresh.notified() => {
                    tracing::debug!("On-demand refresh requested");
                }
            }

            match self.client.fetch_stats().await {
                Ok(response) => {
                    self.feed.publish(TransmissionSample::from_response(response));
                }
                Err(e) => {
                    tracing::warn!("Failed to poll transmission stats: {}", e);
                }
            }
        }
    }
}
