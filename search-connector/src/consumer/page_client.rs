//! Transport for paginated upstream requests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use tracing::debug;

use crate::consumer::credentials::Credential;
use crate::errors::IngestError;

/// Timeout for a single upstream page request.
pub const PAGE_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw response to a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for issuing GET requests against an upstream API.
///
/// This trait abstracts the HTTP client so the pagination logic can be
/// tested without network access. Production code uses [`HttpPageClient`],
/// tests use [`MockPageClient`](crate::consumer::MockPageClient).
///
/// Implementations return every HTTP status as a [`PageResponse`]; only
/// transport failures (DNS, connect, timeout) are errors.
#[async_trait]
pub trait PageClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<PageResponse, IngestError>;
}

/// Production page client backed by reqwest.
pub struct HttpPageClient {
    client: Client,
    credential: Option<Credential>,
}

impl HttpPageClient {
    /// Create a client with its own connection pool.
    pub fn new(credential: Option<Credential>) -> Result<Self, IngestError> {
        let client = Client::builder().timeout(PAGE_REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, credential))
    }

    pub fn with_client(client: Client, credential: Option<Credential>) -> Self {
        Self { client, credential }
    }
}

#[async_trait]
impl PageClient for HttpPageClient {
    async fn get(&self, url: &str) -> Result<PageResponse, IngestError> {
        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(credential) = &self.credential {
            request = request.header(AUTHORIZATION, credential.header_value());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url = %url, status, bytes = body.len(), "Upstream response");

        Ok(PageResponse { status, body })
    }
}
