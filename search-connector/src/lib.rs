//! # Search Connector
//!
//! Extracts records from paginated upstream APIs (object store, employee
//! directory, collaboration-platform pages) and bulk-indexes them into an
//! Enterprise Search engine.
//!
//! ## Architecture
//!
//! The connector follows the Consumer-Processor-Loader pattern:
//!
//! 1. **Consumer**: Walks paginated upstream APIs and exposes a lazy record stream
//! 2. **Processor**: Normalizes raw records into envelopes
//! 3. **Loader**: Batches envelopes and submits them to the bulk documents endpoint
//! 4. **Orchestrator**: Provisions the engine and coordinates one run
//!
//! ## Modules
//!
//! - [`config`]: Command line, settings and dependency initialization
//! - [`consumer`]: Page clients, pagination and source clients
//! - [`processor`]: Normalizers and HTML extraction
//! - [`loader`]: Batching bulk-index sink
//! - [`orchestrator`]: Coordinates a sync or crawl run
//! - [`errors`]: Error types for the connector

pub mod config;
pub mod consumer;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;

pub use config::Dependencies;
pub use errors::IngestError;

use thiserror::Error;

/// Errors that can occur during connector initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
