//! Normalizer for collaboration-platform pages.

use search_connector_shared::{Envelope, SourceSlug};
use serde_json::{json, Value};
use tracing::debug;

use crate::processor::html;
use crate::processor::{identifier, non_blank_str, Normalizer};

/// Title used for pages that have none.
pub const UNTITLED_PAGE: &str = "Pagina zonder titel";

/// Maps a page descriptor (`{id, title, url, blocks: [{html}]}`) to an envelope.
///
/// The HTML of all blocks is reduced to plain text and a list of headings;
/// the payload is `{id, title, content, headings}`.
#[derive(Debug, Clone)]
pub struct PageNormalizer {
    slug: SourceSlug,
}

impl PageNormalizer {
    pub fn new(slug: SourceSlug) -> Self {
        Self { slug }
    }
}

impl Normalizer for PageNormalizer {
    fn normalize(&self, raw: &Value) -> Option<Envelope> {
        let Some(id) = identifier(raw, "id") else {
            debug!(source = %self.slug, "Page without id");
            return None;
        };

        let title = non_blank_str(raw, "title").unwrap_or(UNTITLED_PAGE).to_string();
        let url = non_blank_str(raw, "url").map(str::to_string);

        let markup: Vec<&str> = raw
            .get("blocks")
            .and_then(Value::as_array)
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|block| block.get("html").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();
        let extracted = html::extract(&markup.join("\n"));

        let payload = json!({
            "id": id,
            "title": title,
            "content": extracted.content,
            "headings": extracted.headings,
        });

        Envelope::new(self.slug.document_id(&id), payload)
            .ok()
            .map(|envelope| envelope.with_title(Some(title)).with_url(url))
    }
}
