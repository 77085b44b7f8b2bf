//! Normalizer for object-store records.

use search_connector_shared::{Envelope, SourceSlug};
use serde_json::Value;
use tracing::debug;

use crate::processor::{non_blank_str, Normalizer};

/// Maps an object API record (`{uuid, record: {data}}`) to an envelope.
///
/// The envelope id is `<slug>_<uuid>` and the payload is the record data
/// verbatim. Title and meta summary are left empty.
#[derive(Debug, Clone)]
pub struct ObjectNormalizer {
    slug: SourceSlug,
}

impl ObjectNormalizer {
    pub fn new(slug: SourceSlug) -> Self {
        Self { slug }
    }
}

impl Normalizer for ObjectNormalizer {
    fn normalize(&self, raw: &Value) -> Option<Envelope> {
        let Some(uuid) = non_blank_str(raw, "uuid") else {
            debug!(source = %self.slug, "Object without uuid");
            return None;
        };

        let data = raw
            .get("record")
            .and_then(|record| record.get("data"))
            .filter(|data| data.is_object());
        let Some(data) = data else {
            debug!(source = %self.slug, uuid, "Object without record data");
            return None;
        };

        Envelope::new(self.slug.document_id(uuid), data.clone()).ok()
    }
}
