//! Source slug type.
//!
//! The slug names the source a document came from. It is used as a JSON
//! property name in the search engine, as the `object_bron` value and as the
//! id prefix, so it is restricted to the characters the engine accepts in
//! field names.

use std::fmt;

use thiserror::Error;

/// Errors raised while validating a source slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// The slug was empty.
    #[error("Source slug must not be empty")]
    Empty,

    /// The slug contained a character outside `[a-z0-9_]`.
    #[error("Invalid character {character:?} in source slug {slug:?}")]
    InvalidCharacter { slug: String, character: char },
}

/// Short identifier naming the source of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceSlug(String);

impl SourceSlug {
    /// Validate and wrap a slug.
    ///
    /// # Example
    ///
    /// ```
    /// use search_connector_shared::SourceSlug;
    ///
    /// assert!(SourceSlug::new("smoelenboek").is_ok());
    /// assert!(SourceSlug::new("Smoelen-boek").is_err());
    /// ```
    pub fn new(slug: impl Into<String>) -> Result<Self, SlugError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(SlugError::Empty);
        }

        if let Some(character) = slug
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(SlugError::InvalidCharacter { slug, character });
        }

        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace a source-local identifier with this slug.
    pub fn document_id(&self, local_id: &str) -> String {
        format!("{}_{}", self.0, local_id)
    }
}

impl fmt::Display for SourceSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SourceSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        for slug in ["vac", "smoelenboek", "kennisbank_2"] {
            assert_eq!(SourceSlug::new(slug).unwrap().as_str(), slug);
        }
    }

    #[test]
    fn test_invalid_slugs() {
        assert_eq!(SourceSlug::new("").unwrap_err(), SlugError::Empty);
        assert!(matches!(
            SourceSlug::new("Vac").unwrap_err(),
            SlugError::InvalidCharacter { character: 'V', .. }
        ));
        assert!(SourceSlug::new("object bron").is_err());
        assert!(SourceSlug::new("object-bron").is_err());
    }

    #[test]
    fn test_document_id() {
        let slug = SourceSlug::new("vac").unwrap();
        assert_eq!(slug.document_id("123"), "vac_123");
    }
}
