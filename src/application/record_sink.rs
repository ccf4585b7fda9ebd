// Sink trait for time-series records
use crate::domain::record::Record;
use async_trait::async_trait;

#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Write a batch of records. An error is fatal for the caller.
    async fn write(&self, records: Vec<Record>) -> anyhow::Result<()>;
}
