//! HTTP client for the job-board database (Notion REST API).

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::record::{Record, SendStatus, SEND_STATUS_KEY};

const DEFAULT_API_BASE: &str = "https://api.notion.com";
const NOTION_API_VERSION: &str = "2022-06-28";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Read and write access to the record store.
pub trait RecordStore {
    /// Fetch the current batch of records, in store order.
    fn fetch_records(&self) -> Result<Vec<Record>, StoreError>;

    /// Persist a new send status for one record.
    fn update_send_status(&self, page_id: &str, status: SendStatus) -> Result<(), StoreError>;
}

/// Notion-backed implementation of [`RecordStore`].
#[derive(Debug, Clone)]
pub struct NotionStore {
    token: String,
    database_id: String,
    api_base: String,
    client: reqwest::blocking::Client,
}

impl NotionStore {
    pub fn new(token: String, database_id: String) -> Self {
        Self {
            token,
            database_id,
            api_base: DEFAULT_API_BASE.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Point the client at a different API host (used by tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(StoreError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Record>,
}

impl RecordStore for NotionStore {
    fn fetch_records(&self) -> Result<Vec<Record>, StoreError> {
        let url = format!("{}/v1/databases/{}/query", self.api_base, self.database_id);
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_API_VERSION)
            .header("Content-Type", "application/json")
            .send()?;
        let response = Self::check(response)?;
        let parsed: QueryResponse = response.json()?;
        debug!(count = parsed.results.len(), "fetched records from store");
        Ok(parsed.results)
    }

    fn update_send_status(&self, page_id: &str, status: SendStatus) -> Result<(), StoreError> {
        let url = format!("{}/v1/pages/{}", self.api_base, page_id);
        let body = serde_json::json!({
            "properties": {
                SEND_STATUS_KEY: { "status": { "name": status.as_str() } }
            }
        });
        let response = self
            .client
            .patch(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_API_VERSION)
            .json(&body)
            .send()?;
        Self::check(response)?;
        debug!(page = page_id, status = status.as_str(), "updated send status");
        Ok(())
    }
}
