// Readings as returned by the DSMR-reader history API
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// One stored reading. Column values keep their JSON encoding; the API
/// returns decimals as strings and some counters as integers.
#[derive(Debug, Clone, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub extra_device_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub extra_device_delivered: Option<serde_json::Value>,
    #[serde(flatten)]
    pub columns: HashMap<String, serde_json::Value>,
}

impl Reading {
    pub fn column(&self, name: &str) -> Option<&serde_json::Value> {
        self.columns.get(name).filter(|value| !value.is_null())
    }
}

/// One page of the paginated reading list.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingPage {
    pub count: u64,
    pub next: Option<String>,
    pub results: Vec<Reading>,
}
