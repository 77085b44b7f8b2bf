//! Search index provider trait definition.
//!
//! This module defines the abstract interface for submitting document batches,
//! allowing for different backend implementations and mock providers in tests.

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::spool::SealedBatch;
use crate::types::BatchReceipt;

/// Abstracts the bulk documents endpoint of the indexing backend.
///
/// Implementations are injected into the connector's loader. All methods
/// return `Result<T, SearchIndexError>` for consistent error handling across
/// backend implementations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Submit one sealed batch of documents.
    ///
    /// Documents with an id that already exists in the engine are replaced.
    ///
    /// # Arguments
    ///
    /// * `batch` - A sealed JSON array of rendered documents
    ///
    /// # Returns
    ///
    /// * `Ok(BatchReceipt)` - If the backend accepted the request
    /// * `Err(SearchIndexError::TransmissionError)` - If the backend answered with a failure status
    /// * `Err(SearchIndexError)` - If the request could not be sent
    async fn submit_documents(&self, batch: SealedBatch) -> Result<BatchReceipt, SearchIndexError>;
}
