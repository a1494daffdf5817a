//! sidekiq-stats core: the stats model, lenient decoder, metric write plan,
//! and the error surface shared by the bridge crates.
//!
//! This crate carries no HTTP or backend dependencies so the decision logic
//! (schema mapping, dimensions, namespaces, fan-out order) can be exercised
//! without any I/O.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed payloads surface as `BridgeError::Decode`, never as a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod stats;

/// Shared result type.
pub use error::{BridgeError, Result, Stage};
pub use metric::{GlobalValueSource, MetricUnit, MetricWrite, PlannedWrite};
pub use stats::{QueueStat, StatsSnapshot};
