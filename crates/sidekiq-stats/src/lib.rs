//! Top-level facade crate for sidekiq-stats.
//!
//! Re-exports the stats model and the bridge so a scheduled job can depend on
//! a single crate:
//!
//! ```no_run
//! # async fn job() -> sidekiq_stats::core::Result<()> {
//! let report = sidekiq_stats::bridge::run().await?;
//! println!("{} writes for {} queues", report.writes, report.queues);
//! # Ok(())
//! # }
//! ```
//!
//! The `cloudwatch` feature (default) forwards to the bridge backend of the
//! same name.

pub mod core {
    pub use sidekiq_stats_core::*;
}

pub mod bridge {
    pub use sidekiq_stats_bridge::*;
}
