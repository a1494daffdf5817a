//! sidekiq-stats bridge library entry.
//!
//! Wires the config loader, the stats fetcher, the metrics backends, and the
//! publisher into a single run. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod backend;
pub mod config;
pub mod fetch;
pub mod publish;
pub mod run;

pub use run::{run, run_with, RunReport};
