//! Metrics backends.
//!
//! The publisher only sees [`MetricsBackend`]; a concrete backend is picked
//! once at startup from `backend.kind`.

#[cfg(feature = "cloudwatch")]
pub mod cloudwatch;
pub mod log;

use std::sync::Arc;

use async_trait::async_trait;

use sidekiq_stats_core::error::Result;
use sidekiq_stats_core::MetricWrite;

use crate::config::{BackendKind, BackendSection};

#[cfg(feature = "cloudwatch")]
pub use cloudwatch::CloudWatchBackend;
pub use log::LogBackend;

/// Submits one named, dimensioned, timestamped datum per call.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    fn name(&self) -> &'static str;
    async fn put_metric(&self, write: &MetricWrite) -> Result<()>;
}

/// Build the configured backend.
pub async fn build(cfg: &BackendSection) -> Result<Arc<dyn MetricsBackend>> {
    match cfg.kind {
        BackendKind::Log => Ok(Arc::new(LogBackend::new())),
        #[cfg(feature = "cloudwatch")]
        BackendKind::Cloudwatch => Ok(Arc::new(CloudWatchBackend::from_region(&cfg.region).await)),
        #[cfg(not(feature = "cloudwatch"))]
        BackendKind::Cloudwatch => Err(sidekiq_stats_core::BridgeError::Config(
            "backend.kind=cloudwatch requires the `cloudwatch` feature".into(),
        )),
    }
}
