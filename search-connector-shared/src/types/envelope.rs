//! Envelope types for the search connector.
//!
//! An envelope is the uniform record every source produces and the sink consumes.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while building an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The envelope id was empty or whitespace only.
    #[error("Envelope id must not be empty")]
    EmptyId,
}

/// Normalized record emitted by a source, ready for indexing.
///
/// Envelopes are immutable once built. The `id` doubles as the document key in
/// the search engine, so it is namespaced by the source that produced it and
/// is never empty.
///
/// # Fields
///
/// - `id`: Stable, source-namespaced identifier
/// - `title`: Optional human-readable label
/// - `meta_summary`: Optional denormalized text used for relevance
/// - `url`: Optional address of the originating web resource
/// - `payload`: The full record as understood by the source, passed through verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    id: String,
    title: Option<String>,
    meta_summary: Option<String>,
    url: Option<String>,
    payload: Value,
}

impl Envelope {
    /// Create a new envelope with only an id and a payload.
    ///
    /// # Arguments
    ///
    /// * `id` - The source-namespaced identifier
    /// * `payload` - The full upstream record
    ///
    /// # Returns
    ///
    /// * `Ok(Envelope)` - The new envelope
    /// * `Err(EnvelopeError::EmptyId)` - If `id` is blank
    ///
    /// # Example
    ///
    /// ```
    /// use search_connector_shared::Envelope;
    /// use serde_json::json;
    ///
    /// let envelope = Envelope::new("vac_42", json!({"vraag": "Wat?"}))
    ///     .unwrap()
    ///     .with_title(Some("Wat?".to_string()));
    /// assert_eq!(envelope.id(), "vac_42");
    /// ```
    pub fn new(id: impl Into<String>, payload: Value) -> Result<Self, EnvelopeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EnvelopeError::EmptyId);
        }

        Ok(Self {
            id,
            title: None,
            meta_summary: None,
            url: None,
            payload,
        })
    }

    /// Set the title.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Set the meta summary.
    pub fn with_meta_summary(mut self, meta_summary: Option<String>) -> Self {
        self.meta_summary = meta_summary;
        self
    }

    /// Set the source URL.
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn meta_summary(&self) -> Option<&str> {
        self.meta_summary.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_envelope() {
        let envelope = Envelope::new("kennisbank_1", json!({"a": 1}))
            .unwrap()
            .with_title(Some("Titel".to_string()))
            .with_meta_summary(Some("meta".to_string()))
            .with_url(Some("https://example.org/1".to_string()));

        assert_eq!(envelope.id(), "kennisbank_1");
        assert_eq!(envelope.title(), Some("Titel"));
        assert_eq!(envelope.meta_summary(), Some("meta"));
        assert_eq!(envelope.url(), Some("https://example.org/1"));
        assert_eq!(envelope.payload(), &json!({"a": 1}));
    }

    #[test]
    fn test_empty_id_rejected() {
        assert_eq!(
            Envelope::new("", json!({})).unwrap_err(),
            EnvelopeError::EmptyId
        );
        assert_eq!(
            Envelope::new("   ", json!({})).unwrap_err(),
            EnvelopeError::EmptyId
        );
    }
}
