//! Mock page client for testing and local development.
//!
//! The `MockPageClient` is pre-populated with URL → response mappings and
//! records every URL it is asked for, so tests can assert on the exact
//! request sequence without network access.
//!
//! # Example
//!
//! ```ignore
//! use search_connector::consumer::{MockPageClient, PageClient};
//! use serde_json::json;
//!
//! let client = MockPageClient::new();
//! client.register_json("http://objects/api/v2/objects?page=1", &json!({"results": [], "next": null}));
//! let response = client.get("http://objects/api/v2/objects?page=1").await?;
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use crate::consumer::page_client::{PageClient, PageResponse};
use crate::errors::IngestError;

/// Mock page client that returns pre-configured responses.
///
/// Unregistered URLs answer with status 404 and an empty body.
#[derive(Default)]
pub struct MockPageClient {
    responses: RwLock<HashMap<String, PageResponse>>,
    requests: Mutex<Vec<String>>,
}

impl MockPageClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raw response for a URL.
    pub fn register(&self, url: &str, status: u16, body: impl Into<String>) {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), PageResponse::new(status, body));
    }

    /// Register a 200 JSON response for a URL.
    pub fn register_json(&self, url: &str, body: &Value) {
        self.register(url, 200, body.to_string());
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests issued so far.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl PageClient for MockPageClient {
    async fn get(&self, url: &str) -> Result<PageResponse, IngestError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        let response = self
            .responses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
            .unwrap_or_else(|| PageResponse::new(404, ""));
        Ok(response)
    }
}
