//! Error types for the search connector repository.

mod search_index_error;

pub use search_index_error::SearchIndexError;
