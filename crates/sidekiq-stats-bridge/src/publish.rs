//! Metric publisher.
//!
//! Submits the write plan of a snapshot one datum at a time, in plan order.
//! The first backend error aborts publishing; writes already accepted stay
//! published.

use std::time::SystemTime;

use sidekiq_stats_core::error::Result;
use sidekiq_stats_core::metric::plan_writes;
use sidekiq_stats_core::{GlobalValueSource, StatsSnapshot};

use crate::backend::MetricsBackend;

/// Publish `snapshot` with the default global value source.
/// Returns the number of writes submitted.
pub async fn publish(
    snapshot: &StatsSnapshot,
    backend: &dyn MetricsBackend,
    app_namespace: &str,
) -> Result<usize> {
    publish_with(snapshot, backend, app_namespace, GlobalValueSource::default()).await
}

pub async fn publish_with(
    snapshot: &StatsSnapshot,
    backend: &dyn MetricsBackend,
    app_namespace: &str,
    global_values: GlobalValueSource,
) -> Result<usize> {
    let plan = plan_writes(snapshot, app_namespace, global_values);
    let total = plan.len();

    for (i, planned) in plan.into_iter().enumerate() {
        let write = planned.stamp(SystemTime::now());

        if let Err(e) = backend.put_metric(&write).await {
            tracing::error!(
                backend = backend.name(),
                metric = %write.metric_name,
                namespace = %write.namespace,
                index = i,
                total,
                error = %e,
                "metric write failed, aborting publish"
            );
            return Err(e);
        }

        tracing::debug!(
            backend = backend.name(),
            metric = %write.metric_name,
            namespace = %write.namespace,
            value = write.value,
            "metric written"
        );
    }

    Ok(total)
}
