//! Stats fetcher: one bounded GET against the stats endpoint.
//!
//! A non-2xx status is not an error by itself; the body is decoded either way
//! and only transport or decode failures abort the run.

use std::time::Duration;

use reqwest::Client;

use sidekiq_stats_core::error::{BridgeError, Result};
use sidekiq_stats_core::StatsSnapshot;

/// Default client-level request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct StatsFetcher {
    http: Client,
    url: String,
}

impl StatsFetcher {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BridgeError::transport(url, e))?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<StatsSnapshot> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| BridgeError::transport(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, %status, "stats endpoint returned non-success status");
        }

        // `bytes()` consumes the response, so the connection is released on
        // every path below.
        let body = response
            .bytes()
            .await
            .map_err(|e| BridgeError::transport(&self.url, e))?;

        let snapshot = StatsSnapshot::from_slice(&body)?;
        tracing::debug!(
            url = %self.url,
            enqueued = snapshot.enqueued,
            busy = snapshot.busy,
            retries = snapshot.retries,
            queues = snapshot.queues.len(),
            "stats fetched"
        );
        Ok(snapshot)
    }
}

/// Fetch and decode a single snapshot from `url`.
pub async fn fetch(url: &str, timeout: Duration) -> Result<StatsSnapshot> {
    StatsFetcher::new(url, timeout)?.fetch().await
}
