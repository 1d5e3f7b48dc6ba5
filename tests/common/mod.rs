//! Test infrastructure for packwatch integration tests.
//!
//! Provides a `TestApp` wrapper around `axum_test::TestServer`. The poller
//! is never started; tests inject samples directly through the stats feed,
//! which is exactly what a resolved poll does.

use axum_test::TestServer;
use chrono::Utc;

use packwatch::config::{Config, HostConfig, PanelConfig, ServerConfig};
use packwatch::stats::TransmissionSample;
use packwatch::{router, AppState};

pub struct TestApp {
    server: TestServer,
    state: AppState,
}

impl TestApp {
    /// Create a test application with statistics display enabled.
    pub fn new() -> Self {
        Self::with_show_stats(true)
    }

    /// Create a test application with an explicit `show_stats` setting.
    pub fn with_show_stats(show_stats: bool) -> Self {
        let config = Config {
            server: ServerConfig {
                bind: "127.0.0.1".to_string(),
                port: 0,
            },
            host: HostConfig::default(),
            panel: PanelConfig { show_stats },
        };

        let state = AppState::new(config);
        let server = TestServer::new(router(state.clone())).expect("Failed to start test server");

        Self { server, state }
    }

    pub fn server(&self) -> &TestServer {
        &self.server
    }

    /// Publish a sample as if a poll had just resolved.
    pub fn publish_sample(&self, sample: TransmissionSample) {
        self.state.feed.publish(sample);
    }
}

/// Build a sample with the given raw numbers.
pub fn sample(
    total_bytes: f64,
    packed_bytes: f64,
    total_bytes_per_sec: f64,
    enabled: bool,
) -> TransmissionSample {
    TransmissionSample {
        total_bytes,
        packed_bytes,
        total_bytes_per_sec,
        enabled,
        received_at: Utc::now(),
    }
}
