//! Enterprise Search provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! and `EngineAdministration` on top of the App Search REST API, using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Map, Value};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use crate::config::EnterpriseSearchConfig;
use crate::enterprise_search::endpoints::Endpoints;
use crate::errors::SearchIndexError;
use crate::interfaces::{EngineAdministration, SearchIndexProvider};
use crate::spool::SealedBatch;
use crate::types::{BatchReceipt, CrawlerDomainStatus};

/// Upper bound for a single request, including the batch upload.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Enterprise Search provider implementation.
///
/// Every request is authenticated with the private API key as a bearer
/// credential. Response bodies of document submissions are forwarded to
/// standard output, or to standard error when the backend rejects the batch.
///
/// # Example
///
/// ```ignore
/// use search_connector_repository::{EnterpriseSearchConfig, EnterpriseSearchProvider};
///
/// let config = EnterpriseSearchConfig::new("http://localhost:3002", "private-key", "gemeente");
/// let provider = EnterpriseSearchProvider::new(config)?;
/// provider.ensure_engine().await?;
/// ```
pub struct EnterpriseSearchProvider {
    client: Client,
    endpoints: Endpoints,
    api_key: String,
    language: String,
}

impl EnterpriseSearchProvider {
    /// Create a new provider with its own HTTP client.
    ///
    /// # Returns
    ///
    /// * `Ok(EnterpriseSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the base URL is invalid or the client cannot be built
    pub fn new(config: EnterpriseSearchConfig) -> Result<Self, SearchIndexError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Self::with_client(client, config)
    }

    /// Create a provider that shares an existing HTTP client.
    pub fn with_client(
        client: Client,
        config: EnterpriseSearchConfig,
    ) -> Result<Self, SearchIndexError> {
        let endpoints = Endpoints::new(&config.base_url, &config.engine)?;

        info!(
            url = %config.base_url,
            engine = %config.engine,
            "Created Enterprise Search provider"
        );

        Ok(Self {
            client,
            endpoints,
            api_key: config.api_key,
            language: config.language,
        })
    }

    async fn failure(context: &str, response: Response) -> SearchIndexError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        SearchIndexError::provisioning(format!("{context} failed with status {status}: {body}"))
    }
}

/// Copy a response body to `sink` chunk by chunk.
async fn forward_body<W>(response: Response, mut sink: W) -> Result<u64, SearchIndexError>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;
    let mut chunks = response.bytes_stream();
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        sink.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    sink.write_all(b"\n").await?;
    sink.flush().await?;
    Ok(written)
}

#[async_trait]
impl SearchIndexProvider for EnterpriseSearchProvider {
    #[instrument(skip(self, batch), fields(engine = %self.endpoints.engine_name()))]
    async fn submit_documents(&self, batch: SealedBatch) -> Result<BatchReceipt, SearchIndexError> {
        let documents = batch.document_count();
        let bytes = batch.content_length();

        let response = self
            .client
            .post(self.endpoints.documents())
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, bytes)
            .body(batch.into_body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let mut stderr = tokio::io::stderr();
            stderr.write_all(body.as_bytes()).await?;
            stderr.write_all(b"\n").await?;
            return Err(SearchIndexError::transmission(status.as_u16(), documents, body));
        }

        let forwarded = forward_body(response, tokio::io::stdout()).await?;
        debug!(documents, bytes, forwarded, status = status.as_u16(), "Batch accepted");

        Ok(BatchReceipt {
            documents,
            bytes,
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl EngineAdministration for EnterpriseSearchProvider {
    #[instrument(skip(self), fields(engine = %self.endpoints.engine_name()))]
    async fn ensure_engine(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .get(self.endpoints.engine())
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                debug!("Engine already exists");
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                let response = self
                    .client
                    .post(self.endpoints.engines())
                    .bearer_auth(&self.api_key)
                    .json(&json!({
                        "name": self.endpoints.engine_name(),
                        "language": self.language,
                    }))
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(Self::failure("Creating engine", response).await);
                }
                info!(language = %self.language, "Created engine");
                Ok(())
            }
            _ => Err(Self::failure("Looking up engine", response).await),
        }
    }

    #[instrument(skip(self), fields(engine = %self.endpoints.engine_name()))]
    async fn ensure_text_fields(&self, fields: &[String]) -> Result<(), SearchIndexError> {
        if fields.is_empty() {
            return Ok(());
        }

        let schema: Map<String, Value> = fields
            .iter()
            .map(|field| (field.clone(), Value::String("text".to_string())))
            .collect();

        let response = self
            .client
            .post(self.endpoints.schema())
            .bearer_auth(&self.api_key)
            .json(&schema)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure("Updating schema", response).await);
        }
        debug!(count = fields.len(), "Declared text fields");
        Ok(())
    }

    #[instrument(skip(self), fields(engine = %self.endpoints.engine_name()))]
    async fn add_crawler_domain(
        &self,
        domain_url: &str,
    ) -> Result<CrawlerDomainStatus, SearchIndexError> {
        let response = self
            .client
            .post(self.endpoints.crawler_domains())
            .bearer_auth(&self.api_key)
            .json(&json!({
                "name": domain_url,
                "entry_points": [{ "value": "/" }],
            }))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                info!(domain = %domain_url, "Registered crawler domain");
                Ok(CrawlerDomainStatus::Registered)
            }
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                warn!(domain = %domain_url, response = %body, "Crawler domain not added, assuming it is already registered");
                Ok(CrawlerDomainStatus::AlreadyRegistered)
            }
            _ => Err(Self::failure("Adding crawler domain", response).await),
        }
    }

    #[instrument(skip(self), fields(engine = %self.endpoints.engine_name()))]
    async fn request_crawl(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .post(self.endpoints.crawl_requests())
            .bearer_auth(&self.api_key)
            .json(&json!({}))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure("Requesting crawl", response).await);
        }
        info!("Crawl requested");
        Ok(())
    }
}
