//! Settings read from the environment.
//!
//! Only the settings of the selected command are required; a missing
//! variable is reported as a configuration error naming it.

use std::collections::HashMap;
use std::env;

use search_connector_repository::config::DEFAULT_ENGINE_LANGUAGE;
use search_connector_repository::EnterpriseSearchConfig;
use search_connector_shared::SourceSlug;

use crate::consumer::VAC_SLUG;
use crate::loader::MAX_BATCH_SIZE;
use crate::IndexingError;

/// Default Enterprise Search URL.
pub const DEFAULT_ENTERPRISE_SEARCH_URL: &str = "http://localhost:3002";

/// Default engine name.
pub const DEFAULT_ENGINE_NAME: &str = "search-connector";

/// Default slug of the object source.
pub const DEFAULT_OBJECTS_SLUG: &str = "kennisbank";

/// Default slug of the page source.
pub const DEFAULT_PAGES_SLUG: &str = "intranet";

/// Snapshot of the variables the connector reads.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    vars: HashMap<String, String>,
}

impl Settings {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_pairs(env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Non-blank value of `key`, trimmed.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn required(&self, key: &str) -> Result<String, IndexingError> {
        self.optional(key)
            .ok_or_else(|| IndexingError::config(format!("{key} is not set")))
    }

    pub fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Connection settings for the indexing backend.
    ///
    /// - `ENTERPRISE_SEARCH_URL` (default: http://localhost:3002)
    /// - `ENTERPRISE_SEARCH_API_KEY` (required)
    /// - `ENTERPRISE_SEARCH_ENGINE_NAME` (default: search-connector)
    /// - `ENTERPRISE_SEARCH_ENGINE_LANGUAGE` (default: nl)
    pub fn enterprise_search(&self) -> Result<EnterpriseSearchConfig, IndexingError> {
        let config = EnterpriseSearchConfig::new(
            self.or_default("ENTERPRISE_SEARCH_URL", DEFAULT_ENTERPRISE_SEARCH_URL),
            self.required("ENTERPRISE_SEARCH_API_KEY")?,
            self.or_default("ENTERPRISE_SEARCH_ENGINE_NAME", DEFAULT_ENGINE_NAME),
        )
        .with_language(self.or_default(
            "ENTERPRISE_SEARCH_ENGINE_LANGUAGE",
            DEFAULT_ENGINE_LANGUAGE,
        ));
        Ok(config)
    }

    /// `BATCH_SIZE`, default and maximum 100.
    pub fn batch_size(&self) -> Result<usize, IndexingError> {
        match self.optional("BATCH_SIZE") {
            None => Ok(MAX_BATCH_SIZE),
            Some(value) => match value.parse::<usize>() {
                Ok(size) if size > 0 => Ok(size.min(MAX_BATCH_SIZE)),
                _ => Err(IndexingError::config(format!(
                    "BATCH_SIZE must be a positive integer, got {value:?}"
                ))),
            },
        }
    }

    fn list(&self, key: &str) -> Vec<String> {
        self.optional(key)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|field| !field.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn slug(value: &str) -> Result<SourceSlug, IndexingError> {
    SourceSlug::new(value).map_err(|e| IndexingError::config(e.to_string()))
}

/// Settings of an object-store source.
#[derive(Debug, Clone)]
pub struct ObjectsSettings {
    pub base_url: String,
    pub token: String,
    pub object_type: String,
    pub slug: SourceSlug,
    pub suggestion_fields: Vec<String>,
}

impl ObjectsSettings {
    /// The default structured source.
    ///
    /// - `OBJECTS_API_URL`, `OBJECTS_API_TOKEN`, `OBJECTS_OBJECT_TYPE` (required)
    /// - `OBJECTS_SOURCE_SLUG` (default: kennisbank)
    /// - `OBJECTS_SUGGESTION_FIELDS` (comma separated, default: none)
    pub fn default_source(settings: &Settings) -> Result<Self, IndexingError> {
        Ok(Self {
            base_url: settings.required("OBJECTS_API_URL")?,
            token: settings.required("OBJECTS_API_TOKEN")?,
            object_type: settings.required("OBJECTS_OBJECT_TYPE")?,
            slug: slug(&settings.or_default("OBJECTS_SOURCE_SLUG", DEFAULT_OBJECTS_SLUG))?,
            suggestion_fields: settings.list("OBJECTS_SUGGESTION_FIELDS"),
        })
    }

    /// The VAC source.
    ///
    /// - `VAC_OBJECTS_API_URL`, `VAC_OBJECTS_API_TOKEN` (fall back to `OBJECTS_API_*`)
    /// - `VAC_OBJECT_TYPE` (required)
    /// - `VAC_SUGGESTION_FIELDS` (comma separated, default: none)
    pub fn vac(settings: &Settings) -> Result<Self, IndexingError> {
        let base_url = match settings.optional("VAC_OBJECTS_API_URL") {
            Some(url) => url,
            None => settings.required("OBJECTS_API_URL")?,
        };
        let token = match settings.optional("VAC_OBJECTS_API_TOKEN") {
            Some(token) => token,
            None => settings.required("OBJECTS_API_TOKEN")?,
        };

        Ok(Self {
            base_url,
            token,
            object_type: settings.required("VAC_OBJECT_TYPE")?,
            slug: slug(VAC_SLUG)?,
            suggestion_fields: settings.list("VAC_SUGGESTION_FIELDS"),
        })
    }
}

/// Settings of the employee directory source.
#[derive(Debug, Clone)]
pub struct EmployeeSettings {
    pub objecttypes_url: String,
    pub objecttypes_token: String,
    pub objects_url: String,
    pub objects_token: String,
}

impl EmployeeSettings {
    /// - `OBJECTTYPES_API_URL`, `OBJECTTYPES_API_TOKEN` (required)
    /// - `OBJECTS_API_URL`, `OBJECTS_API_TOKEN` (required)
    pub fn from_settings(settings: &Settings) -> Result<Self, IndexingError> {
        Ok(Self {
            objecttypes_url: settings.required("OBJECTTYPES_API_URL")?,
            objecttypes_token: settings.required("OBJECTTYPES_API_TOKEN")?,
            objects_url: settings.required("OBJECTS_API_URL")?,
            objects_token: settings.required("OBJECTS_API_TOKEN")?,
        })
    }
}

/// Settings of the collaboration-platform page source.
#[derive(Debug, Clone)]
pub struct PagesSettings {
    pub base_url: String,
    pub token: String,
    pub slug: SourceSlug,
}

impl PagesSettings {
    /// - `PAGES_API_URL`, `PAGES_API_TOKEN` (required)
    /// - `PAGES_SOURCE_SLUG` (default: intranet)
    pub fn from_settings(settings: &Settings) -> Result<Self, IndexingError> {
        Ok(Self {
            base_url: settings.required("PAGES_API_URL")?,
            token: settings.required("PAGES_API_TOKEN")?,
            slug: slug(&settings.or_default("PAGES_SOURCE_SLUG", DEFAULT_PAGES_SLUG))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        Settings::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_enterprise_search_defaults() {
        let config = settings(&[("ENTERPRISE_SEARCH_API_KEY", "private-key")])
            .enterprise_search()
            .unwrap();

        assert_eq!(config.base_url, "http://localhost:3002");
        assert_eq!(config.api_key, "private-key");
        assert_eq!(config.engine, "search-connector");
        assert_eq!(config.language, "nl");
    }

    #[test]
    fn test_missing_api_key_names_variable() {
        let err = settings(&[("ENTERPRISE_SEARCH_API_KEY", "  ")])
            .enterprise_search()
            .unwrap_err();
        assert!(err.to_string().contains("ENTERPRISE_SEARCH_API_KEY"));
    }

    #[test]
    fn test_batch_size() {
        assert_eq!(settings(&[]).batch_size().unwrap(), 100);
        assert_eq!(settings(&[("BATCH_SIZE", "25")]).batch_size().unwrap(), 25);
        assert_eq!(settings(&[("BATCH_SIZE", "1000")]).batch_size().unwrap(), 100);
        assert!(settings(&[("BATCH_SIZE", "0")]).batch_size().is_err());
        assert!(settings(&[("BATCH_SIZE", "veel")]).batch_size().is_err());
    }

    #[test]
    fn test_vac_falls_back_to_objects_api() {
        let vac = ObjectsSettings::vac(&settings(&[
            ("OBJECTS_API_URL", "http://objects.test"),
            ("OBJECTS_API_TOKEN", "objects-token"),
            ("VAC_OBJECT_TYPE", "http://types.test/api/v2/objecttypes/3"),
            ("VAC_SUGGESTION_FIELDS", "title, object_meta,"),
        ]))
        .unwrap();

        assert_eq!(vac.base_url, "http://objects.test");
        assert_eq!(vac.token, "objects-token");
        assert_eq!(vac.slug.as_str(), "vac");
        assert_eq!(vac.suggestion_fields, vec!["title", "object_meta"]);
    }

    #[test]
    fn test_default_source_slug() {
        let base = [
            ("OBJECTS_API_URL", "http://objects.test"),
            ("OBJECTS_API_TOKEN", "t"),
            ("OBJECTS_OBJECT_TYPE", "http://types.test/1"),
        ];
        let objects = ObjectsSettings::default_source(&settings(&base)).unwrap();
        assert_eq!(objects.slug.as_str(), "kennisbank");
        assert!(objects.suggestion_fields.is_empty());

        let mut invalid = base.to_vec();
        invalid.push(("OBJECTS_SOURCE_SLUG", "Kennis Bank"));
        assert!(ObjectsSettings::default_source(&settings(&invalid)).is_err());
    }

    #[test]
    fn test_pages_settings() {
        let pages = PagesSettings::from_settings(&settings(&[
            ("PAGES_API_URL", "http://pages.test"),
            ("PAGES_API_TOKEN", "jwt"),
        ]))
        .unwrap();
        assert_eq!(pages.slug.as_str(), "intranet");

        assert!(PagesSettings::from_settings(&settings(&[("PAGES_API_URL", "x")])).is_err());
    }
}
