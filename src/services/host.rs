//! Printer host client.
//!
//! Fetches transmission statistics from the MeatPack plugin endpoint on the
//! printer host. One GET, no retry or backoff; a failed poll is reported and
//! the previous sample stays in place.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::stats::HostStatsResponse;

const STATS_PATH: &str = "/api/plugin/meatpack";

/// HTTP client for the printer host's plugin status endpoint.
pub struct HostClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HostClient {
    /// Create a new host client.
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(AppError::Internal(
                "Printer host URL cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create a new host client wrapped in Arc for shared access.
    pub fn new_shared(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(base_url, api_key, timeout)?))
    }

    /// Fetch the current transmission statistics sample.
    pub async fn fetch_stats(&self) -> Result<HostStatsResponse> {
        let url = format!("{}{}", self.base_url, STATS_PATH);
        tracing::debug!(url = %url, "Fetching transmission stats");

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout("transmission stats request".to_string())
            } else {
                AppError::ServiceUnavailable(format!("printer host: {}", e))
            }
        })?;

        if !response.status().is_success() {
            return Err(AppError::ServiceUnavailable(format!(
                "printer host returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("printer host response: {}", e)))
    }
}
