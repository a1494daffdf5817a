//! One snapshot-and-publish cycle.

use sidekiq_stats_core::error::Result;

use crate::backend::{self, MetricsBackend};
use crate::config::{self, BridgeConfig};
use crate::fetch::StatsFetcher;
use crate::publish::publish_with;

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub queues: usize,
    pub writes: usize,
}

/// Fetch once, then publish every write the snapshot implies.
/// Nothing is published when the fetch fails.
pub async fn run_with(cfg: &BridgeConfig, backend: &dyn MetricsBackend) -> Result<RunReport> {
    let fetcher = StatsFetcher::new(&cfg.stats.url, cfg.stats.timeout())?;
    tracing::debug!(url = fetcher.url(), timeout_ms = cfg.stats.timeout_ms, "fetching stats");
    let snapshot = fetcher.fetch().await?;

    let writes = publish_with(
        &snapshot,
        backend,
        &cfg.backend.namespace,
        cfg.publish.global_values,
    )
    .await?;

    Ok(RunReport {
        queues: snapshot.queues.len(),
        writes,
    })
}

/// Entry point for the scheduled job: config from file or environment,
/// backend from config, then a single cycle.
pub async fn run() -> Result<RunReport> {
    let cfg = config::load()?;
    let backend = backend::build(&cfg.backend).await?;

    tracing::info!(
        url = %cfg.stats.url,
        backend = backend.name(),
        region = %cfg.backend.region,
        namespace = %cfg.backend.namespace,
        global_values = cfg.publish.global_values.as_str(),
        "sidekiq-stats run starting"
    );

    run_with(&cfg, backend.as_ref()).await
}
