//! Bridge config loader (strict YAML, or environment variables).

pub mod schema;

use std::fs;

use sidekiq_stats_core::error::{BridgeError, Result};
use sidekiq_stats_core::GlobalValueSource;

pub use schema::{BackendKind, BackendSection, BridgeConfig, PublishSection, StatsSection};

/// Env var naming a YAML config file. When unset, config comes from the
/// variables below.
pub const CONFIG_PATH_ENV: &str = "SIDEKIQ_STATS_CONFIG";

pub const STATS_URL_ENV: &str = "SIDEKIQ_STATS_URL";
pub const STATS_TIMEOUT_ENV: &str = "SIDEKIQ_STATS_TIMEOUT_MS";
pub const BACKEND_ENV: &str = "METRICS_BACKEND";
pub const REGION_ENV: &str = "AWS_REGION";
pub const NAMESPACE_ENV: &str = "APP_NAME";
pub const GLOBAL_VALUES_ENV: &str = "GLOBAL_METRIC_VALUES";

pub fn load_from_file(path: &str) -> Result<BridgeConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BridgeError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<BridgeConfig> {
    let cfg: BridgeConfig = serde_yaml::from_str(s)
        .map_err(|e| BridgeError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Build config from the process environment.
pub fn load_from_env() -> Result<BridgeConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Build config from an arbitrary key lookup (the environment in production).
pub fn load_from_lookup<F>(lookup: F) -> Result<BridgeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let url = var(STATS_URL_ENV)
        .ok_or_else(|| BridgeError::Config(format!("{STATS_URL_ENV} is not set")))?;

    let timeout_ms = match var(STATS_TIMEOUT_ENV) {
        Some(v) => v.trim().parse::<u64>().map_err(|e| {
            BridgeError::Config(format!("{STATS_TIMEOUT_ENV} must be an integer: {e}"))
        })?,
        None => schema::default_timeout_ms(),
    };

    let kind = match var(BACKEND_ENV) {
        Some(v) => BackendKind::parse(v.trim())?,
        None => BackendKind::default(),
    };

    let global_values = match var(GLOBAL_VALUES_ENV).as_deref().map(str::trim) {
        None | Some("enqueued") => GlobalValueSource::Enqueued,
        Some("per_field") => GlobalValueSource::PerField,
        Some(other) => {
            return Err(BridgeError::Config(format!(
                "{GLOBAL_VALUES_ENV} must be `enqueued` or `per_field`, got `{other}`"
            )))
        }
    };

    let cfg = BridgeConfig {
        version: 1,
        stats: StatsSection { url, timeout_ms },
        backend: BackendSection {
            kind,
            region: var(REGION_ENV).unwrap_or_else(schema::default_region),
            namespace: var(NAMESPACE_ENV).unwrap_or_else(schema::default_namespace),
        },
        publish: PublishSection { global_values },
    };
    cfg.validate()?;
    Ok(cfg)
}

/// File when [`CONFIG_PATH_ENV`] is set, environment otherwise.
pub fn load() -> Result<BridgeConfig> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => load_from_file(path.trim()),
        _ => load_from_env(),
    }
}
