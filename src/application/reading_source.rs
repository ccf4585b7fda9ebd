// Source trait for paginated history readings
use crate::domain::reading::ReadingPage;
use async_trait::async_trait;

#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Fetch the page behind `url`, either the first page or a `next` cursor.
    async fn fetch_page(&self, url: &str) -> anyhow::Result<ReadingPage>;
}
