use async_trait::async_trait;

use sidekiq_stats_core::error::Result;
use sidekiq_stats_core::MetricWrite;

use super::MetricsBackend;

/// Logs every write instead of submitting it. Useful for dry runs against a
/// real stats endpoint.
#[derive(Debug, Default)]
pub struct LogBackend;

impl LogBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricsBackend for LogBackend {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn put_metric(&self, write: &MetricWrite) -> Result<()> {
        tracing::info!(
            namespace = %write.namespace,
            metric = %write.metric_name,
            unit = write.unit.as_str(),
            value = write.value,
            dimensions = ?write.dimensions,
            "metric datum"
        );
        Ok(())
    }
}
