//! Collaboration-platform page source.

use std::sync::Arc;

use async_trait::async_trait;
use search_connector_shared::SourceSlug;

use crate::consumer::messages::CursorLocation;
use crate::consumer::page_client::PageClient;
use crate::consumer::paginated_fetcher::PaginatedFetcher;
use crate::consumer::{EnvelopeStream, SourceClient};
use crate::errors::IngestError;
use crate::processor::{Normalizer, PageNormalizer};

/// Number of pages requested per upstream call.
const PAGE_LIMIT: usize = 100;

/// First page of the page listing.
pub fn pages_url(pages_base: &str) -> String {
    format!(
        "{}/api/v2/pages?limit={}",
        pages_base.trim_end_matches('/'),
        PAGE_LIMIT
    )
}

/// All pages of a collaboration platform, paginated through `_links.next`.
pub struct PageSource {
    fetcher: PaginatedFetcher,
    url: String,
    slug: SourceSlug,
}

impl PageSource {
    pub fn new(client: Arc<dyn PageClient>, pages_base: &str, slug: SourceSlug) -> Self {
        Self {
            fetcher: PaginatedFetcher::new(client, CursorLocation::Links),
            url: pages_url(pages_base),
            slug,
        }
    }
}

#[async_trait]
impl SourceClient for PageSource {
    fn slug(&self) -> &SourceSlug {
        &self.slug
    }

    fn suggestion_fields(&self) -> Vec<String> {
        vec!["title".to_string()]
    }

    async fn envelopes(&self) -> Result<EnvelopeStream, IngestError> {
        let normalizer = PageNormalizer::new(self.slug.clone());
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

    #[tokio::test]
    async fn test_pages_follow_links() {
        let client = Arc::new(MockPageClient::new());
        client.register_json(
            "http://pages.test/api/v2/pages?limit=100",
            &json!({
                "results": [{"id": 1, "title": "Eerste", "blocks": [{"html": "<p>Een</p>"}]}],
                "_links": {"next": {"href": "/api/v2/pages?limit=100&offset=100"}}
            }),
        );
        client.register_json(
            "http://pages.test/api/v2/pages?limit=100&offset=100",
            &json!({
                "results": [{"id": 2, "blocks": []}],
                "_links": {"next": null}
            }),
        );

        let source = PageSource::new(
            client.clone(),
            "http://pages.test/",
            SourceSlug::new("intranet").unwrap(),
        );
        let envelopes: Vec<_> = source
            .envelopes()
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].id(), "intranet_1");
        assert_eq!(envelopes[0].payload()["content"], "Een");
        assert_eq!(envelopes[1].title(), Some("Pagina zonder titel"));
        assert_eq!(client.request_count(), 2);
    }
}
