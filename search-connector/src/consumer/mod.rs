//! Consumer module for the search connector ingest.
//!
//! Provides paginated upstream fetching and the source clients that turn
//! upstream APIs into lazy envelope streams.

mod credentials;
mod employee_source;
mod messages;
mod mock;
mod object_source;
mod page_client;
mod page_source;
mod paginated_fetcher;

pub use credentials::Credential;
pub use employee_source::{EmployeeSource, EMPLOYEE_SLUG, EMPLOYEE_TYPE_NAME};
pub use messages::{CursorLocation, PaginationEnvelope};
pub use mock::MockPageClient;
pub use object_source::{objects_url, ObjectSource, VAC_SLUG};
pub use page_client::{HttpPageClient, PageClient, PageResponse, PAGE_REQUEST_TIMEOUT};
pub use page_source::{pages_url, PageSource};
pub use paginated_fetcher::PaginatedFetcher;

use async_trait::async_trait;
use futures::stream::BoxStream;
use search_connector_shared::{Envelope, SourceSlug};

use crate::errors::IngestError;

/// Lazy, fallible sequence of envelopes produced by a source.
pub type EnvelopeStream = BoxStream<'static, Result<Envelope, IngestError>>;

/// Trait for upstream sources that can be synced into the search engine.
///
/// A source combines one or more paginated fetchers with a normalizer. It
/// exposes the slug its documents are filed under and the fields that should
/// be declared as text fields for autocomplete.
#[async_trait]
pub trait SourceClient: Send + Sync {
    fn slug(&self) -> &SourceSlug;

    fn suggestion_fields(&self) -> Vec<String>;

    /// Open the envelope stream.
    ///
    /// Any discovery the source needs before it can stream happens here, so
    /// configuration problems surface before the first document is indexed.
    async fn envelopes(&self) -> Result<EnvelopeStream, IngestError>;
}
