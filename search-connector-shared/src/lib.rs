//! # Search Connector Shared
//!
//! This crate defines the data structures that travel between the extraction
//! side and the indexing side of the search connector. Every source turns its
//! records into an [`Envelope`]; the sink renders each envelope together with
//! the [`SourceSlug`] of its source as a [`SourceDocument`].

pub mod types;

pub use types::envelope::{Envelope, EnvelopeError};
pub use types::source_document::SourceDocument;
pub use types::source_slug::{SlugError, SourceSlug};
