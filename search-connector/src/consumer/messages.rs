//! Message types for paginated upstream responses.

use serde::Deserialize;
use serde_json::Value;

/// Where a paginated API puts the URL of the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorLocation {
    /// Top-level `next`, an absolute URL (ZGW APIs).
    Next,
    /// `_links.next`, possibly relative to the current request URL.
    Links,
}

/// The `{results, next}` wrapper every upstream page is delivered in.
#[derive(Debug, Deserialize)]
pub struct PaginationEnvelope {
    pub results: Vec<Value>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: Option<PageLinks>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<Link>,
}

/// A link given either as a bare string or as `{ "href": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Link {
    Href(String),
    Object { href: Option<String> },
}

impl Link {
    fn href(&self) -> Option<&str> {
        match self {
            Self::Href(href) => Some(href),
            Self::Object { href } => href.as_deref(),
        }
    }
}

impl PaginationEnvelope {
    /// The continuation cursor, if any. Blank cursors count as absent.
    pub fn next_cursor(&self, location: CursorLocation) -> Option<&str> {
        let cursor = match location {
            CursorLocation::Next => self.next.as_deref(),
            CursorLocation::Links => self
                .links
                .as_ref()
                .and_then(|links| links.next.as_ref())
                .and_then(Link::href),
        };
        cursor.map(str::trim).filter(|c| !c.is_empty())
    }
}
