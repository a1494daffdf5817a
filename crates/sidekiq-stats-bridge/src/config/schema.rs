use std::time::Duration;

use serde::Deserialize;
use sidekiq_stats_core::error::{BridgeError, Result};
use sidekiq_stats_core::GlobalValueSource;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    pub stats: StatsSection,

    #[serde(default)]
    pub backend: BackendSection,

    #[serde(default)]
    pub publish: PublishSection,
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BridgeError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.stats.validate()?;
        self.backend.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsSection {
    /// Sidekiq stats endpoint (JSON).
    pub url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl StatsSection {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(BridgeError::Config("stats.url must not be empty".into()));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(BridgeError::Config(
                "stats.url must be an http:// or https:// url".into(),
            ));
        }
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(BridgeError::Config(
                "stats.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// AWS CloudWatch `PutMetricData`.
    #[default]
    Cloudwatch,
    /// Writes are logged instead of submitted.
    Log,
}

impl BackendKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "cloudwatch" => Ok(BackendKind::Cloudwatch),
            "log" => Ok(BackendKind::Log),
            other => Err(BridgeError::Config(format!("unknown backend kind: {other}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    #[serde(default)]
    pub kind: BackendKind,

    #[serde(default = "default_region")]
    pub region: String,

    /// Namespace for the global metrics.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            region: default_region(),
            namespace: default_namespace(),
        }
    }
}

impl BackendSection {
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(BridgeError::Config("backend.region must not be empty".into()));
        }
        if self.namespace.trim().is_empty() {
            return Err(BridgeError::Config(
                "backend.namespace must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishSection {
    #[serde(default)]
    pub global_values: GlobalValueSource,
}

pub(crate) fn default_timeout_ms() -> u64 {
    10000
}
pub(crate) fn default_region() -> String {
    "ap-southeast-1".into()
}
pub(crate) fn default_namespace() -> String {
    "nameless app".into()
}
