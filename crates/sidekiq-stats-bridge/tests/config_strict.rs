#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;

use sidekiq_stats_bridge::config::{self, BackendKind};
use sidekiq_stats_core::GlobalValueSource;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
stats:
  url: "http://app.internal/sidekiq/stats"
backend:
  namespac: "oms" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.stage().as_str(), "config");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
stats:
  url: "http://app.internal/sidekiq/stats"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.stats.timeout_ms, 10000);
    assert_eq!(cfg.backend.kind, BackendKind::Cloudwatch);
    assert_eq!(cfg.backend.region, "ap-southeast-1");
    assert_eq!(cfg.backend.namespace, "nameless app");
    assert_eq!(cfg.publish.global_values, GlobalValueSource::Enqueued);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
stats:
  url: "https://app.internal/sidekiq/stats"
  timeout_ms: 2500
backend:
  kind: log
  region: eu-west-1
  namespace: "OMS"
publish:
  global_values: per_field
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.stats.timeout().as_millis(), 2500);
    assert_eq!(cfg.backend.kind, BackendKind::Log);
    assert_eq!(cfg.backend.region, "eu-west-1");
    assert_eq!(cfg.backend.namespace, "OMS");
    assert_eq!(cfg.publish.global_values, GlobalValueSource::PerField);
}

#[test]
fn rejects_bad_values() {
    let cases = [
        "version: 2\nstats: { url: \"http://x/stats\" }\n",
        "version: 1\nstats: { url: \"\" }\n",
        "version: 1\nstats: { url: \"ftp://x/stats\" }\n",
        "version: 1\nstats: { url: \"http://x/stats\", timeout_ms: 10 }\n",
        "version: 1\nstats: { url: \"http://x/stats\" }\nbackend: { namespace: \"  \" }\n",
        "version: 1\nstats: { url: \"http://x/stats\" }\nbackend: { kind: prometheus }\n",
        "version: 1\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.stage().as_str(), "config", "case={case}");
    }
}

#[test]
fn env_lookup_defaults() {
    let env: HashMap<&str, &str> = [("SIDEKIQ_STATS_URL", "http://app.internal/sidekiq/stats")].into();
    let cfg = config::load_from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
    assert_eq!(cfg.stats.url, "http://app.internal/sidekiq/stats");
    assert_eq!(cfg.stats.timeout_ms, 10000);
    assert_eq!(cfg.backend.region, "ap-southeast-1");
    assert_eq!(cfg.backend.namespace, "nameless app");
}

#[test]
fn env_lookup_overrides() {
    let env: HashMap<&str, &str> = [
        ("SIDEKIQ_STATS_URL", "http://app.internal/sidekiq/stats"),
        ("SIDEKIQ_STATS_TIMEOUT_MS", "3000"),
        ("METRICS_BACKEND", "log"),
        ("AWS_REGION", "us-east-1"),
        ("APP_NAME", "OMS"),
        ("GLOBAL_METRIC_VALUES", "per_field"),
    ]
    .into();
    let cfg = config::load_from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
    assert_eq!(cfg.stats.timeout_ms, 3000);
    assert_eq!(cfg.backend.kind, BackendKind::Log);
    assert_eq!(cfg.backend.region, "us-east-1");
    assert_eq!(cfg.backend.namespace, "OMS");
    assert_eq!(cfg.publish.global_values, GlobalValueSource::PerField);
}

#[test]
fn env_lookup_requires_url() {
    let err = config::load_from_lookup(|_| None).unwrap_err();
    assert_eq!(err.stage().as_str(), "config");

    let err = config::load_from_lookup(|k| match k {
        "SIDEKIQ_STATS_URL" => Some("http://x/stats".into()),
        "SIDEKIQ_STATS_TIMEOUT_MS" => Some("soon".into()),
        _ => None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("SIDEKIQ_STATS_TIMEOUT_MS"));
}

#[tokio::test]
async fn log_backend_builds() {
    let cfg = config::load_from_str(
        "version: 1\nstats: { url: \"http://x/stats\" }\nbackend: { kind: log }\n",
    )
    .unwrap();
    let backend = sidekiq_stats_bridge::backend::build(&cfg.backend).await.unwrap();
    assert_eq!(backend.name(), "log");
}

#[cfg(feature = "cloudwatch")]
#[tokio::test]
async fn env_defaults_build_cloudwatch_backend() {
    let cfg = config::load_from_lookup(|k| match k {
        "SIDEKIQ_STATS_URL" => Some("http://app.internal/sidekiq/stats".into()),
        _ => None,
    })
    .unwrap();
    assert_eq!(cfg.backend.kind, BackendKind::Cloudwatch);

    let backend = sidekiq_stats_bridge::backend::build(&cfg.backend).await.unwrap();
    assert_eq!(backend.name(), "cloudwatch");
}
