// DSMR-reader REST API client
use crate::application::reading_source::ReadingSource;
use crate::domain::reading::ReadingPage;
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct DsmrReaderClient {
    client: reqwest::Client,
    api_key: String,
}

impl DsmrReaderClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ReadingSource for DsmrReaderClient {
    async fn fetch_page(&self, url: &str) -> Result<ReadingPage> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to DSMR-reader")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("DSMR-reader request failed with status {}: {}", status, body);
        }

        let page = response
            .json::<ReadingPage>()
            .await
            .context("Failed to parse DSMR-reader response")?;

        tracing::debug!("Fetched {} readings from {}", page.results.len(), url);
        Ok(page)
    }
}
