//! Cursor-paginated upstream fetching.
//!
//! Walks a paginated JSON API page by page and yields the records of each page
//! lazily. Requests are strictly sequential; the next page is only requested
//! once the consumer has pulled every record of the current one.

use std::sync::Arc;

use async_stream::stream;
use futures::stream::BoxStream;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::consumer::messages::{CursorLocation, PaginationEnvelope};
use crate::consumer::page_client::PageClient;
use crate::errors::IngestError;

/// Fetches every record of a cursor-paginated API.
///
/// Status handling per page:
/// - 2xx: records are extracted and the next cursor, if any, is followed
/// - 400: treated as an empty result; the stream ends without error
/// - any other status: the stream yields one `IngestError::FetchFailed` and ends
///
/// A 2xx body that is not a `{results, next}` envelope also ends the stream
/// without error.
#[derive(Clone)]
pub struct PaginatedFetcher {
    client: Arc<dyn PageClient>,
    cursor: CursorLocation,
}

impl PaginatedFetcher {
    pub fn new(client: Arc<dyn PageClient>, cursor: CursorLocation) -> Self {
        Self { client, cursor }
    }

    /// Stream every record reachable from `initial_url`.
    ///
    /// # Arguments
    ///
    /// * `initial_url` - URL of the first page
    /// * `extract` - Maps a raw record to an item; `None` skips the record
    ///
    /// # Returns
    ///
    /// A lazy stream of extracted items in page order. Dropping the stream
    /// cancels any request in flight.
    pub fn fetch<T, F>(
        &self,
        initial_url: impl Into<String>,
        extract: F,
    ) -> BoxStream<'static, Result<T, IngestError>>
    where
        T: Send + 'static,
        F: Fn(&Value) -> Option<T> + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let location = self.cursor;
        let mut next_url = Some(initial_url.into());

        Box::pin(stream! {
            let mut page_number = 0usize;

            while let Some(url) = next_url.take() {
                page_number += 1;
                debug!(url = %url, page = page_number, "Fetching page");

                let response = match client.get(&url).await {
                    Ok(response) => response,
                    Err(e) => {
                        error!(url = %url, error = %e, "Page request failed");
                        yield Err(e);
                        break;
                    }
                };

                if response.status == 400 {
                    warn!(url = %url, body = %response.body, "Upstream answered 400, treating as empty");
                    break;
                }

                if !response.is_success() {
                    error!(url = %url, status = response.status, body = %response.body, "Upstream request failed");
                    yield Err(IngestError::fetch_failed(url, response.status, response.body));
                    break;
                }

                let page: PaginationEnvelope = match serde_json::from_str(&response.body) {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(url = %url, error = %e, "Unparsable pagination envelope, treating as empty");
                        break;
                    }
                };

                if let Some(cursor) = page.next_cursor(location) {
                    match resolve_cursor(&url, cursor, location) {
                        Ok(next) if next == url => {
                            warn!(url = %url, "Next cursor points at the current page, stopping");
                        }
                        Ok(next) => next_url = Some(next),
                        Err(e) => {
                            yield Err(e);
                            break;
                        }
                    }
                }

                debug!(url = %url, records = page.results.len(), "Page received");

                for record in &page.results {
                    match extract(record) {
                        Some(item) => yield Ok(item),
                        None => debug!(url = %url, "Skipping invalid record"),
                    }
                }
            }
        })
    }
}

/// Turn a continuation cursor into the URL of the next request.
///
/// `_links` cursors may be relative and are resolved against the URL of the
/// page they were found on; `next` cursors are used verbatim.
fn resolve_cursor(
    current_url: &str,
    cursor: &str,
    location: CursorLocation,
) -> Result<String, IngestError> {
    match location {
        CursorLocation::Next => Ok(cursor.to_string()),
        CursorLocation::Links => {
            let base = Url::parse(current_url)?;
            Ok(base.join(cursor)?.to_string())
        }
    }
}
