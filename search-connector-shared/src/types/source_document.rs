//! Wire rendering of an envelope for the bulk documents endpoint.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::envelope::Envelope;
use crate::types::source_slug::SourceSlug;

/// Property holding the source slug in every indexed document.
pub const SOURCE_FIELD: &str = "object_bron";

/// Property holding the meta summary in every indexed document.
pub const META_FIELD: &str = "object_meta";

/// Borrowing view of an envelope as one element of a bulk documents request.
///
/// Serializes to:
///
/// ```json
/// { "id": "...", "title": "..."|null, "object_meta": "..."|null,
///   "object_bron": "<slug>", "url": "...", "<slug>": <payload> }
/// ```
///
/// `url` is omitted when the envelope has none.
#[derive(Debug, Clone, Copy)]
pub struct SourceDocument<'a> {
    envelope: &'a Envelope,
    slug: &'a SourceSlug,
}

impl<'a> SourceDocument<'a> {
    pub fn new(envelope: &'a Envelope, slug: &'a SourceSlug) -> Self {
        Self { envelope, slug }
    }
}

impl Serialize for SourceDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let url = self.envelope.url();
        let mut map = serializer.serialize_map(Some(if url.is_some() { 6 } else { 5 }))?;
        map.serialize_entry("id", self.envelope.id())?;
        map.serialize_entry("title", &self.envelope.title())?;
        map.serialize_entry(META_FIELD, &self.envelope.meta_summary())?;
        map.serialize_entry(SOURCE_FIELD, self.slug.as_str())?;
        if let Some(url) = url {
            map.serialize_entry("url", url)?;
        }
        map.serialize_entry(self.slug.as_str(), self.envelope.payload())?;
        map.end()
    }
}
