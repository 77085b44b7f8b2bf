//! Processor module for the search connector ingest.
//!
//! Normalizes raw upstream records into envelopes. Each source kind has its
//! own normalizer; all of them share the [`Normalizer`] trait so the fetcher
//! can apply them as record filters.

mod employee_normalizer;
pub mod html;
mod object_normalizer;
mod page_normalizer;

pub use employee_normalizer::EmployeeNormalizer;
pub use object_normalizer::ObjectNormalizer;
pub use page_normalizer::{PageNormalizer, UNTITLED_PAGE};

use search_connector_shared::Envelope;
use serde_json::Value;

/// Maps a raw upstream record to an envelope.
///
/// Implementations are pure and total: a record that does not carry the
/// fields the source requires yields `None` and is skipped by the caller.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw: &Value) -> Option<Envelope>;
}

/// Non-blank trimmed string at `key`.
pub(crate) fn non_blank_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Identifier given as a non-blank string or as an integer.
pub(crate) fn identifier(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}
