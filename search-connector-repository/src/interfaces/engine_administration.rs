//! Engine administration trait definition.

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::CrawlerDomainStatus;

/// Provisioning calls against the search administration API.
///
/// These calls are auxiliary to indexing: they make sure the target engine
/// exists and knows the fields used for autocomplete, and they drive the
/// backend's web crawler for domain sources.
#[async_trait]
pub trait EngineAdministration: Send + Sync {
    /// Ensure the configured engine exists, creating it if necessary.
    async fn ensure_engine(&self) -> Result<(), SearchIndexError>;

    /// Declare the given fields as text fields in the engine schema.
    ///
    /// An empty slice is a no-op.
    async fn ensure_text_fields(&self, fields: &[String]) -> Result<(), SearchIndexError>;

    /// Register a web domain with the engine crawler.
    async fn add_crawler_domain(&self, domain_url: &str)
        -> Result<CrawlerDomainStatus, SearchIndexError>;

    /// Ask the crawler to start a crawl of all registered domains.
    async fn request_crawl(&self) -> Result<(), SearchIndexError>;
}
