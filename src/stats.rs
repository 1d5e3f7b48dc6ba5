//! Transmission statistics: the polled sample, the derived display strings,
//! and the feed that fans new samples out to render paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::format::{self, NO_DATA};

/// Numeric fields reported by the host under `transmissionStats`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmissionStats {
    pub total_bytes: f64,
    pub packed_bytes: f64,
    pub total_bytes_sec: f64,
}

/// Raw response body of the host plugin's status endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostStatsResponse {
    pub transmission_stats: TransmissionStats,
    pub enabled: bool,
}

/// One snapshot of transmission statistics.
///
/// A sample is replaced wholesale on each successful poll; there is no
/// history and no partial update. `received_at` is stamped locally when the
/// poll resolves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmissionSample {
    pub total_bytes: f64,
    pub packed_bytes: f64,
    pub total_bytes_per_sec: f64,
    pub enabled: bool,
    pub received_at: DateTime<Utc>,
}

impl TransmissionSample {
    pub fn from_response(response: HostStatsResponse) -> Self {
        Self {
            total_bytes: response.transmission_stats.total_bytes,
            packed_bytes: response.transmission_stats.packed_bytes,
            total_bytes_per_sec: response.transmission_stats.total_bytes_sec,
            enabled: response.enabled,
            received_at: Utc::now(),
        }
    }
}

/// The five display strings the panel shows, derived from the latest sample.
///
/// Until the first sample arrives every field is the no-data sentinel, which
/// distinguishes "nothing received yet" from a genuine zero reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDisplay {
    pub total_tx: String,
    pub packed_tx: String,
    pub ratio: String,
    pub rate: String,
    pub packing_state: String,
    pub last_updated: String,
    pub has_data: bool,
}

impl StatsDisplay {
    /// Derive display strings from the current sample.
    pub fn render(sample: Option<&TransmissionSample>) -> Self {
        match sample {
            Some(sample) => Self {
                total_tx: format::format_byte_size(sample.total_bytes, 3),
                packed_tx: format::format_byte_size(sample.packed_bytes, 3),
                ratio: format::format_ratio(sample.packed_bytes, sample.total_bytes),
                rate: format::format_rate(sample.total_bytes_per_sec),
                packing_state: format::format_enabled_state(sample.enabled).to_string(),
                last_updated: sample.received_at.format("%H:%M:%S").to_string(),
                has_data: true,
            },
            None => Self {
                total_tx: NO_DATA.to_string(),
                packed_tx: NO_DATA.to_string(),
                ratio: NO_DATA.to_string(),
                rate: NO_DATA.to_string(),
                packing_state: NO_DATA.to_string(),
                last_updated: NO_DATA.to_string(),
                has_data: false,
            },
        }
    }

    /// Display used when statistics are disabled in the panel settings:
    /// numeric fields show a dash, the packing state is still reported.
    pub fn hidden(sample: Option<&TransmissionSample>) -> Self {
        Self {
            total_tx: "-".to_string(),
            packed_tx: "-".to_string(),
            ratio: "-".to_string(),
            rate: "-".to_string(),
            packing_state: sample
                .map(|s| format::format_enabled_state(s.enabled).to_string())
                .unwrap_or_else(|| NO_DATA.to_string()),
            last_updated: "-".to_string(),
            has_data: sample.is_some(),
        }
    }

    /// Pick the display variant for the panel configuration.
    pub fn for_panel(show_stats: bool, sample: Option<&TransmissionSample>) -> Self {
        if show_stats {
            Self::render(sample)
        } else {
            Self::hidden(sample)
        }
    }
}

/// Latest-sample feed: a watch channel that render paths subscribe to.
///
/// Publishing replaces the previous sample wholesale (last-write-wins); a
/// poll that resolves late simply publishes a briefly stale sample.
#[derive(Debug, Clone)]
pub struct StatsFeed {
    tx: watch::Sender<Option<TransmissionSample>>,
}

impl StatsFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the current sample and wake subscribers.
    pub fn publish(&self, sample: TransmissionSample) {
        self.tx.send_replace(Some(sample));
    }

    /// Clone of the most recent sample, if any.
    pub fn latest(&self) -> Option<TransmissionSample> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<TransmissionSample>> {
        self.tx.subscribe()
    }
}

impl Default for StatsFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransmissionSample {
        TransmissionSample {
            total_bytes: 1_048_576.0,
            packed_bytes: 524_288.0,
            total_bytes_per_sec: 1536.0,
            enabled: true,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn no_sample_renders_sentinels() {
        let display = StatsDisplay::render(None);
        assert_eq!(display.total_tx, NO_DATA);
        assert_eq!(display.packed_tx, NO_DATA);
        assert_eq!(display.ratio, NO_DATA);
        assert_eq!(display.rate, NO_DATA);
        assert_eq!(display.packing_state, NO_DATA);
        assert!(!display.has_data);
    }

    #[test]
    fn sample_renders_formatted_fields() {
        let display = StatsDisplay::render(Some(&sample()));
        assert_eq!(display.total_tx, "1.000 MB");
        assert_eq!(display.packed_tx, "512.000 kB");
        assert_eq!(display.ratio, "0.500");
        assert_eq!(display.rate, "1.500 kB/sec");
        assert_eq!(display.packing_state, "Enabled");
        assert!(display.has_data);
    }

    #[test]
    fn hidden_masks_numbers_but_keeps_state() {
        let display = StatsDisplay::hidden(Some(&sample()));
        assert_eq!(display.total_tx, "-");
        assert_eq!(display.ratio, "-");
        assert_eq!(display.packing_state, "Enabled");

        let display = StatsDisplay::hidden(None);
        assert_eq!(display.packing_state, NO_DATA);
    }

    #[test]
    fn feed_replaces_sample_wholesale() {
        let feed = StatsFeed::new();
        assert!(feed.latest().is_none());

        feed.publish(sample());
        let mut second = sample();
        second.total_bytes = 2_097_152.0;
        feed.publish(second);

        let latest = feed.latest().unwrap();
        assert_eq!(latest.total_bytes, 2_097_152.0);
    }

    #[test]
    fn host_response_deserializes_plugin_shape() {
        let body = serde_json::json!({
            "transmissionStats": {
                "totalBytes": 2048.0,
                "packedBytes": 1024.0,
                "totalBytesSec": 512.0
            },
            "enabled": false
        });

        let response: HostStatsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.transmission_stats.total_bytes, 2048.0);
        assert_eq!(response.transmission_stats.packed_bytes, 1024.0);
        assert_eq!(response.transmission_stats.total_bytes_sec, 512.0);
        assert!(!response.enabled);
    }
}
