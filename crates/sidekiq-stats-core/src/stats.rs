//! Sidekiq stats payload (JSON).
//!
//! Decoding is lenient: unknown fields are ignored, and missing or `null`
//! fields take their zero value. Only syntactically broken JSON (or a value of
//! the wrong type) is an error.

use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// One reading of the stats endpoint.
///
/// Example payload:
/// ```json
/// {
///   "enqueued": 0, "busy": 0, "retries": 691,
///   "queues": [ { "name": "shipment_creation", "size": 0, "latency": 0 } ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatsSnapshot {
    /// Global count of pending jobs.
    #[serde(deserialize_with = "null_as_default")]
    pub enqueued: f64,
    /// Global count of in-flight jobs.
    #[serde(deserialize_with = "null_as_default")]
    pub busy: f64,
    /// Global count of jobs awaiting retry.
    #[serde(deserialize_with = "null_as_default")]
    pub retries: f64,
    /// Per-queue breakdown, in the order the endpoint returned it.
    #[serde(deserialize_with = "null_as_default")]
    pub queues: Vec<QueueStat>,
}

/// Per-queue statistics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueueStat {
    /// Queue name, used verbatim as the `Queue` dimension value.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Current backlog.
    #[serde(deserialize_with = "null_as_default")]
    pub size: f64,
    /// Age of the oldest pending job, in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub latency: f64,
}

impl StatsSnapshot {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let snapshot: StatsSnapshot = serde_json::from_slice(body)?;
        tracing::trace!(queues = snapshot.queues.len(), "stats payload decoded");
        Ok(snapshot)
    }

    /// Number of backend writes this snapshot implies (3 global + 2 per queue).
    pub fn write_count(&self) -> usize {
        crate::metric::GlobalMetric::ALL.len() + 2 * self.queues.len()
    }
}

fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
