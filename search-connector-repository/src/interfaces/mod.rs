//! Interface definitions for the indexing backend.
//!
//! This module defines the abstract traits that allow for dependency injection
//! and swappable backend implementations.

mod engine_administration;
mod search_index_provider;

pub use engine_administration::EngineAdministration;
pub use search_index_provider::SearchIndexProvider;
