//! AWS CloudWatch backend: one `PutMetricData` call carrying one datum.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatch::config::Region;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit};
use aws_sdk_cloudwatch::Client;

use sidekiq_stats_core::error::{BridgeError, Result};
use sidekiq_stats_core::{MetricUnit, MetricWrite};

use super::MetricsBackend;

#[derive(Clone)]
pub struct CloudWatchBackend {
    client: Client,
}

impl CloudWatchBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client for `region`, credentials from the default provider chain.
    pub async fn from_region(region: &str) -> Self {
        let sdk_cfg = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(Client::new(&sdk_cfg))
    }
}

fn standard_unit(unit: MetricUnit) -> StandardUnit {
    match unit {
        MetricUnit::Count => StandardUnit::Count,
        MetricUnit::Seconds => StandardUnit::Seconds,
    }
}

/// Single datum for `write`; the namespace travels on the request.
fn datum(write: &MetricWrite) -> MetricDatum {
    let mut datum = MetricDatum::builder()
        .metric_name(&write.metric_name)
        .unit(standard_unit(write.unit))
        .value(write.value)
        .timestamp(DateTime::from(write.timestamp));

    for (name, value) in &write.dimensions {
        datum = datum.dimensions(Dimension::builder().name(name).value(value).build());
    }

    datum.build()
}

#[async_trait]
impl MetricsBackend for CloudWatchBackend {
    fn name(&self) -> &'static str {
        "cloudwatch"
    }

    async fn put_metric(&self, write: &MetricWrite) -> Result<()> {
        self.client
            .put_metric_data()
            .namespace(&write.namespace)
            .metric_data(datum(write))
            .send()
            .await
            .map_err(|e| BridgeError::backend_write(write, e))?;

        Ok(())
    }
}
