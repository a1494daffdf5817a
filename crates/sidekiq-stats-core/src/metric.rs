//! Metric writes derived from a snapshot.
//!
//! A snapshot with `k` queues maps to exactly `3 + 2k` writes, in a fixed
//! order: the global metrics first, then `Queue Size` / `Queue Latency` for
//! each queue in encounter order. Global metrics go to the application's
//! namespace; per-queue metrics always go to [`QUEUE_NAMESPACE`].

use std::collections::BTreeMap;
use std::time::SystemTime;

use serde::Deserialize;

use crate::stats::{QueueStat, StatsSnapshot};

/// Namespace for per-queue metrics. Not configurable.
pub const QUEUE_NAMESPACE: &str = "OMS Sidekiq Queues";
/// Dimension key carrying the queue name.
pub const QUEUE_DIMENSION: &str = "Queue";
pub const QUEUE_SIZE_METRIC: &str = "Queue Size";
pub const QUEUE_LATENCY_METRIC: &str = "Queue Latency";

/// Backend unit for a datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Count,
    Seconds,
}

impl MetricUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricUnit::Count => "Count",
            MetricUnit::Seconds => "Seconds",
        }
    }
}

/// Scalar metrics published once per run, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalMetric {
    Enqueued,
    Busy,
    Retries,
}

impl GlobalMetric {
    pub const ALL: [GlobalMetric; 3] = [GlobalMetric::Enqueued, GlobalMetric::Busy, GlobalMetric::Retries];

    /// Metric name as published.
    pub fn as_str(self) -> &'static str {
        match self {
            GlobalMetric::Enqueued => "enqueued",
            GlobalMetric::Busy => "busy",
            GlobalMetric::Retries => "retries",
        }
    }

    /// The snapshot field this metric is named after.
    pub fn field_value(self, snapshot: &StatsSnapshot) -> f64 {
        match self {
            GlobalMetric::Enqueued => snapshot.enqueued,
            GlobalMetric::Busy => snapshot.busy,
            GlobalMetric::Retries => snapshot.retries,
        }
    }
}

/// Which snapshot value the global metrics carry.
///
/// The deployed bridge has always published `enqueued` under all three global
/// names. That looks like a defect but dashboards may depend on it, so it
/// stays the default until someone confirms the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalValueSource {
    /// Every global metric carries `snapshot.enqueued`.
    #[default]
    Enqueued,
    /// Each global metric carries its own field.
    PerField,
}

impl GlobalValueSource {
    pub fn value(self, metric: GlobalMetric, snapshot: &StatsSnapshot) -> f64 {
        match self {
            GlobalValueSource::Enqueued => snapshot.enqueued,
            GlobalValueSource::PerField => metric.field_value(snapshot),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GlobalValueSource::Enqueued => "enqueued",
            GlobalValueSource::PerField => "per_field",
        }
    }
}

/// A write whose content is fully decided but which has not been timestamped.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWrite {
    pub metric_name: String,
    pub unit: MetricUnit,
    pub value: f64,
    pub dimensions: BTreeMap<String, String>,
    pub namespace: String,
}

impl PlannedWrite {
    fn global(metric: GlobalMetric, value: f64, app_namespace: &str) -> Self {
        Self {
            metric_name: metric.as_str().to_string(),
            unit: MetricUnit::Count,
            value,
            dimensions: BTreeMap::new(),
            namespace: app_namespace.to_string(),
        }
    }

    fn queue(metric_name: &str, unit: MetricUnit, value: f64, queue: &QueueStat) -> Self {
        let mut dimensions = BTreeMap::new();
        dimensions.insert(QUEUE_DIMENSION.to_string(), queue.name.clone());
        Self {
            metric_name: metric_name.to_string(),
            unit,
            value,
            dimensions,
            namespace: QUEUE_NAMESPACE.to_string(),
        }
    }

    /// Attach the submission time.
    pub fn stamp(self, timestamp: SystemTime) -> MetricWrite {
        MetricWrite {
            metric_name: self.metric_name,
            unit: self.unit,
            value: self.value,
            dimensions: self.dimensions,
            namespace: self.namespace,
            timestamp,
        }
    }
}

/// One datum as submitted to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricWrite {
    pub metric_name: String,
    pub unit: MetricUnit,
    pub value: f64,
    /// Empty for global metrics, `{"Queue": name}` for per-queue metrics.
    pub dimensions: BTreeMap<String, String>,
    pub namespace: String,
    /// Captured immediately before the backend call.
    pub timestamp: SystemTime,
}

/// Derive the ordered write plan for `snapshot`.
pub fn plan_writes(
    snapshot: &StatsSnapshot,
    app_namespace: &str,
    source: GlobalValueSource,
) -> Vec<PlannedWrite> {
    let mut plan = Vec::with_capacity(snapshot.write_count());

    for metric in GlobalMetric::ALL {
        plan.push(PlannedWrite::global(metric, source.value(metric, snapshot), app_namespace));
    }

    for queue in &snapshot.queues {
        plan.push(PlannedWrite::queue(QUEUE_SIZE_METRIC, MetricUnit::Count, queue.size, queue));
        plan.push(PlannedWrite::queue(QUEUE_LATENCY_METRIC, MetricUnit::Seconds, queue.latency, queue));
    }

    plan
}
