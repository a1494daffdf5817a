//! Shared helpers: a recording backend and a local stats endpoint.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{routing::get, Router};

use sidekiq_stats_bridge::backend::MetricsBackend;
use sidekiq_stats_bridge::config::{self, BridgeConfig};
use sidekiq_stats_core::error::{BridgeError, Result};
use sidekiq_stats_core::MetricWrite;

/// Keeps every accepted write; optionally rejects the attempt at `fail_at`.
#[derive(Default)]
pub struct RecordingBackend {
    writes: Mutex<Vec<MetricWrite>>,
    attempts: AtomicUsize,
    fail_at: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `index`-th (0-based) attempt.
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<MetricWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricsBackend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn put_metric(&self, write: &MetricWrite) -> Result<()> {
        let i = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(i) {
            return Err(BridgeError::backend_write(write, "injected failure"));
        }
        self.writes.lock().unwrap().push(write.clone());
        Ok(())
    }
}

/// Serve `app` on an ephemeral port; returns the base url.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serve a fixed body at `/stats`; returns the full stats url.
pub async fn serve_stats(body: &'static str) -> String {
    let base = serve(Router::new().route("/stats", get(move || async move { body }))).await;
    format!("{base}/stats")
}

/// An address nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/stats")
}

pub fn config_for(url: &str, namespace: &str) -> BridgeConfig {
    config::load_from_str(&format!(
        r#"
version: 1
stats:
  url: "{url}"
  timeout_ms: 2000
backend:
  kind: log
  namespace: "{namespace}"
"#
    ))
    .expect("test config must parse")
}
