//! Request and response types for indexing backend operations.

/// Result of a successfully transmitted batch.
///
/// The backend's own response body is forwarded to standard output by the
/// provider; the receipt only carries what the caller needs for bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReceipt {
    /// Number of documents in the batch.
    pub documents: usize,
    /// Size of the request body in bytes.
    pub bytes: u64,
    /// HTTP status returned by the backend.
    pub status: u16,
}

/// Outcome of registering a domain with the engine crawler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlerDomainStatus {
    /// The domain was added.
    Registered,
    /// The backend rejected the domain as already present.
    AlreadyRegistered,
}
