//! sidekiq-stats bridge
//!
//! One invocation = one cycle:
//! - GET the Sidekiq stats endpoint (bounded timeout)
//! - publish 3 global metrics + size/latency per queue
//! - exit non-zero on the first failure

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match sidekiq_stats_bridge::run().await {
        Ok(report) => {
            tracing::info!(queues = report.queues, writes = report.writes, "sidekiq-stats run complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(stage = e.stage().as_str(), error = %e, "sidekiq-stats run failed");
            ExitCode::FAILURE
        }
    }
}
