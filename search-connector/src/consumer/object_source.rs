//! Object-store source (default structured source and VAC).

use std::sync::Arc;

use async_trait::async_trait;
use search_connector_shared::SourceSlug;

use crate::consumer::messages::CursorLocation;
use crate::consumer::page_client::PageClient;
use crate::consumer::paginated_fetcher::PaginatedFetcher;
use crate::consumer::{EnvelopeStream, SourceClient};
use crate::errors::IngestError;
use crate::processor::{Normalizer, ObjectNormalizer};

/// Slug of the VAC (questions and answers) source.
pub const VAC_SLUG: &str = "vac";

/// First page of the objects of one object type.
pub fn objects_url(objects_base: &str, object_type: &str) -> String {
    format!(
        "{}/api/v2/objects?type={}&page=1",
        objects_base.trim_end_matches('/'),
        urlencoding::encode(object_type)
    )
}

/// All objects of a single object type.
pub struct ObjectSource {
    fetcher: PaginatedFetcher,
    url: String,
    slug: SourceSlug,
    suggestion_fields: Vec<String>,
}

impl ObjectSource {
    /// # Arguments
    ///
    /// * `client` - Page client carrying the objects API token
    /// * `objects_base` - Base URL of the objects API
    /// * `object_type` - URL of the object type in the object type registry
    /// * `slug` - Slug the documents are filed under
    pub fn new(
        client: Arc<dyn PageClient>,
        objects_base: &str,
        object_type: &str,
        slug: SourceSlug,
    ) -> Self {
        Self {
            fetcher: PaginatedFetcher::new(client, CursorLocation::Next),
            url: objects_url(objects_base, object_type),
            slug,
            suggestion_fields: Vec::new(),
        }
    }

    pub fn with_suggestion_fields(mut self, fields: Vec<String>) -> Self {
        self.suggestion_fields = fields;
        self
    }
}

#[async_trait]
impl SourceClient for ObjectSource {
    fn slug(&self) -> &SourceSlug {
        &self.slug
    }

    fn suggestion_fields(&self) -> Vec<String> {
        self.suggestion_fields.clone()
    }

    async fn envelopes(&self) -> Result<EnvelopeStream, IngestError> {
        let normalizer = ObjectNormalizer::new(self.slug.clone());
        Ok(self
            .fetcher
            .fetch(self.url.clone(), move |raw| normalizer.normalize(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::MockPageClient;
    use futures::TryStreamExt;
    use serde_json::json;

    #[test]
    fn test_objects_url_encodes_type() {
        assert_eq!(
            objects_url(
                "http://objects.test/",
                "http://types.test/api/v2/objecttypes/1"
            ),
            "http://objects.test/api/v2/objects?type=http%3A%2F%2Ftypes.test%2Fapi%2Fv2%2Fobjecttypes%2F1&page=1"
        );
    }

    #[tokio::test]
    async fn test_streams_normalized_objects() {
        let type_url = "http://types.test/api/v2/objecttypes/9";
        let first = objects_url("http://objects.test", type_url);

        let client = Arc::new(MockPageClient::new());
        client.register_json(
            &first,
            &json!({
                "results": [
                    {"uuid": "1", "record": {"data": {"vraag": "A"}}},
                    {"uuid": "2"},
                    {"uuid": "3", "record": {"data": {"vraag": "C"}}}
                ],
                "next": null
            }),
        );

        let source = ObjectSource::new(
            client,
            "http://objects.test",
            type_url,
            SourceSlug::new(VAC_SLUG).unwrap(),
        )
        .with_suggestion_fields(vec!["title".to_string()]);

        assert_eq!(source.slug().as_str(), "vac");
        assert_eq!(source.suggestion_fields(), vec!["title"]);

        let envelopes: Vec<_> = source
            .envelopes()
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        let ids: Vec<&str> = envelopes.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["vac_1", "vac_3"]);
    }
}
