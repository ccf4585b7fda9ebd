// InfluxDB sink implementation
use crate::application::record_sink::RecordSink;
use crate::domain::record::{FieldValue, Record};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::stream;
use influxdb2::models::DataPoint;
use influxdb2::Client;

pub struct InfluxSink {
    client: Client,
    bucket: String,
}

impl InfluxSink {
    pub fn new(url: &str, org: &str, token: &str, bucket: String) -> Self {
        Self {
            client: Client::new(url.trim_end_matches('/'), org, token),
            bucket,
        }
    }
}

/// Build a point for `record`. Returns `None` for records without fields,
/// which line protocol cannot express.
fn to_data_point(record: &Record) -> Result<Option<DataPoint>> {
    if record.fields().is_empty() {
        return Ok(None);
    }

    let timestamp = record
        .timestamp()
        .timestamp_nanos_opt()
        .with_context(|| format!("Timestamp {} out of range", record.timestamp()))?;

    let mut builder = DataPoint::builder(record.measurement().as_str()).timestamp(timestamp);
    for field in record.fields() {
        let name = field.name.clone();
        builder = match &field.value {
            FieldValue::Float(value) => builder.field(name, *value),
            FieldValue::Integer(value) => builder.field(name, *value),
            FieldValue::Text(value) => builder.field(name, value.clone()),
        };
    }

    let point = builder
        .build()
        .with_context(|| format!("Failed to build {} data point", record.measurement()))?;
    Ok(Some(point))
}

#[async_trait]
impl RecordSink for InfluxSink {
    async fn write(&self, records: Vec<Record>) -> Result<()> {
        let mut points = Vec::with_capacity(records.len());
        for record in &records {
            match to_data_point(record)? {
                Some(point) => points.push(point),
                None => tracing::debug!(
                    "Skipping {} record at {} without fields",
                    record.measurement(),
                    record.timestamp()
                ),
            }
        }

        if points.is_empty() {
            return Ok(());
        }

        let count = points.len();
        self.client
            .write(&self.bucket, stream::iter(points))
            .await
            .with_context(|| format!("Failed to write {} points to bucket {}", count, self.bucket))?;

        tracing::debug!("Wrote {} points to {}", count, self.bucket);
        Ok(())
    }
}
