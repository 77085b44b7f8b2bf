//! Configuration types for the Enterprise Search provider.

/// Default engine language for newly created engines.
pub const DEFAULT_ENGINE_LANGUAGE: &str = "nl";

/// Connection settings for an Enterprise Search (App Search) deployment.
///
/// A single configuration targets a single engine: every document submission,
/// schema update and crawler request goes to `engine`.
#[derive(Debug, Clone)]
pub struct EnterpriseSearchConfig {
    /// Base URL of the deployment, e.g. `http://localhost:3002`.
    pub base_url: String,
    /// Private API key, sent as a bearer credential.
    pub api_key: String,
    /// Name of the engine documents are indexed into.
    pub engine: String,
    /// Language used when the engine has to be created.
    pub language: String,
}

impl EnterpriseSearchConfig {
    /// Create a config with the default engine language.
    ///
    /// A trailing slash on `base_url` is removed.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        engine: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            engine: engine.into(),
            language: DEFAULT_ENGINE_LANGUAGE.to_string(),
        }
    }

    /// Override the engine language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = EnterpriseSearchConfig::new("http://localhost:3002/", "key", "engine");
        assert_eq!(config.base_url, "http://localhost:3002");
        assert_eq!(config.language, "nl");
    }

    #[test]
    fn test_with_language() {
        let config = EnterpriseSearchConfig::new("http://es", "key", "engine").with_language("en");
        assert_eq!(config.language, "en");
    }
}
