//! # Search Connector Repository
//!
//! This crate provides traits and implementations for interacting with the
//! indexing backend. It includes definitions for errors, interfaces, the
//! temporary batch buffer and a concrete implementation for Enterprise Search.

pub mod config;
pub mod enterprise_search;
pub mod errors;
pub mod interfaces;
pub mod spool;
pub mod types;

pub use config::EnterpriseSearchConfig;
pub use enterprise_search::EnterpriseSearchProvider;
pub use errors::SearchIndexError;
pub use interfaces::{EngineAdministration, SearchIndexProvider};
pub use spool::{SealedBatch, SpooledBatch};
pub use types::{BatchReceipt, CrawlerDomainStatus};
