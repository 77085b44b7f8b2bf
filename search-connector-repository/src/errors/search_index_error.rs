//! Search index error types.
//!
//! This module defines the unified error type for all operations against the
//! indexing backend: document submission, engine provisioning and crawler calls.

use thiserror::Error;

/// Unified errors from indexing backend operations.
///
/// Used by the `SearchIndexProvider` and `EngineAdministration` traits. Every
/// variant is fatal for the current run; callers do not retry.
#[derive(Debug, Error)]
pub enum SearchIndexError {
    /// Failed to reach the indexing backend or to build a client for it.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The bulk documents endpoint answered with a non-success status.
    #[error("Transmission of {documents} documents failed with status {status}: {body}")]
    TransmissionError {
        status: u16,
        documents: usize,
        body: String,
    },

    /// An engine, schema or crawler administration call failed.
    #[error("Provisioning error: {0}")]
    ProvisioningError(String),

    /// Failed to serialize a document into the batch buffer.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Reading or writing the temporary batch buffer failed.
    #[error("Spool error: {0}")]
    SpoolError(#[from] std::io::Error),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transmission error.
    pub fn transmission(status: u16, documents: usize, body: impl Into<String>) -> Self {
        Self::TransmissionError {
            status,
            documents,
            body: body.into(),
        }
    }

    /// Create a provisioning error.
    pub fn provisioning(msg: impl Into<String>) -> Self {
        Self::ProvisioningError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}

impl From<serde_json::Error> for SearchIndexError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<reqwest::Error> for SearchIndexError {
    fn from(err: reqwest::Error) -> Self {
        Self::connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_becomes_serialization_error() {
        let err: SearchIndexError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SearchIndexError::SerializationError(_)));
    }
}
