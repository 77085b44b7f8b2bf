//! This module defines the core data structures shared by the connector crates.
//! It re-exports the envelope, the source slug and the rendered document view.

pub mod envelope;
pub mod source_document;
pub mod source_slug;

pub use envelope::Envelope;
pub use source_document::SourceDocument;
pub use source_slug::SourceSlug;
