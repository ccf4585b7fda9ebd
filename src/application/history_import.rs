// History import - Pages through stored readings and writes them as records
use crate::application::reading_mapper::reading_to_records;
use crate::application::reading_source::ReadingSource;
use crate::application::record_sink::RecordSink;
use crate::domain::record::Record;
use anyhow::Context;
use std::sync::Arc;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportProgress {
    pub pages: usize,
    pub imported: u64,
    pub total: u64,
}

#[derive(Clone)]
pub struct HistoryImport {
    source: Arc<dyn ReadingSource>,
    sink: Arc<dyn RecordSink>,
}

impl HistoryImport {
    pub fn new(source: Arc<dyn ReadingSource>, sink: Arc<dyn RecordSink>) -> Self {
        Self { source, sink }
    }

    /// URL of the first page for a DSMR-reader installation.
    pub fn first_page_url(base_url: &str, batch_size: usize) -> String {
        format!(
            "{}/api/v2/datalogger/dsmrreading?limit={}",
            base_url.trim_end_matches('/'),
            batch_size
        )
    }

    /// Follow `next` cursors from `first_url` until the last page, writing
    /// one batch of records per page.
    pub async fn run(&self, first_url: &str) -> anyhow::Result<ImportProgress> {
        let mut progress = ImportProgress::default();
        let mut next_url = Some(first_url.to_string());

        while let Some(url) = next_url {
            let page = self
                .source
                .fetch_page(&url)
                .await
                .with_context(|| format!("Failed to fetch readings from {}", url))?;

            let mut records: Vec<Record> = Vec::with_capacity(page.results.len() * 2);
            for reading in &page.results {
                records.extend(reading_to_records(reading)?);
            }
            self.sink
                .write(records)
                .await
                .context("Failed to write imported records")?;

            progress.pages += 1;
            progress.imported += page.results.len() as u64;
            progress.total = page.count;
            tracing::info!("Imported {}/{}", progress.imported, progress.total);

            next_url = page.next;
        }

        Ok(progress)
    }
}
