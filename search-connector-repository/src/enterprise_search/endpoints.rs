//! URL construction for the App Search REST API.

use url::Url;

use crate::errors::SearchIndexError;

const API_PREFIX: [&str; 3] = ["api", "as", "v1"];

/// Resolves App Search endpoint URLs for one engine.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    engine: String,
}

impl Endpoints {
    /// # Arguments
    ///
    /// * `base_url` - Deployment base URL, with or without a path prefix
    /// * `engine` - Engine name, used as a single path segment
    ///
    /// # Returns
    ///
    /// * `Err(SearchIndexError::ConnectionError)` - If `base_url` is not an absolute http(s) URL
    pub fn new(base_url: &str, engine: &str) -> Result<Self, SearchIndexError> {
        let base = Url::parse(base_url).map_err(|e| {
            SearchIndexError::connection(format!("Invalid Enterprise Search URL {base_url}: {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(SearchIndexError::connection(format!(
                "Enterprise Search URL {base_url} cannot carry a path"
            )));
        }

        Ok(Self {
            base,
            engine: engine.to_string(),
        })
    }

    pub fn engine_name(&self) -> &str {
        &self.engine
    }

    /// `/api/as/v1/engines`
    pub fn engines(&self) -> Url {
        self.build(&[])
    }

    /// `/api/as/v1/engines/{engine}`
    pub fn engine(&self) -> Url {
        self.build(&[self.engine.as_str()])
    }

    /// `/api/as/v1/engines/{engine}/documents`
    pub fn documents(&self) -> Url {
        self.build(&[self.engine.as_str(), "documents"])
    }

    /// `/api/as/v1/engines/{engine}/schema`
    pub fn schema(&self) -> Url {
        self.build(&[self.engine.as_str(), "schema"])
    }

    /// `/api/as/v1/engines/{engine}/crawler/domains`
    pub fn crawler_domains(&self) -> Url {
        self.build(&[self.engine.as_str(), "crawler", "domains"])
    }

    /// `/api/as/v1/engines/{engine}/crawler/crawl_requests`
    pub fn crawl_requests(&self) -> Url {
        self.build(&[self.engine.as_str(), "crawler", "crawl_requests"])
    }

    fn build(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(API_PREFIX.iter())
                .push("engines")
                .extend(segments.iter());
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_urls() {
        let endpoints = Endpoints::new("http://localhost:3002", "gemeente").unwrap();

        assert_eq!(
            endpoints.engines().as_str(),
            "http://localhost:3002/api/as/v1/engines"
        );
        assert_eq!(
            endpoints.documents().as_str(),
            "http://localhost:3002/api/as/v1/engines/gemeente/documents"
        );
        assert_eq!(
            endpoints.crawl_requests().as_str(),
            "http://localhost:3002/api/as/v1/engines/gemeente/crawler/crawl_requests"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let endpoints = Endpoints::new("https://search.example/enterprise", "kb").unwrap();
        assert_eq!(
            endpoints.schema().as_str(),
            "https://search.example/enterprise/api/as/v1/engines/kb/schema"
        );
    }

    #[test]
    fn test_engine_name_is_one_segment() {
        let endpoints = Endpoints::new("http://es", "a/b").unwrap();
        assert_eq!(endpoints.engine().as_str(), "http://es/api/as/v1/engines/a%2Fb");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            Endpoints::new("not a url", "kb"),
            Err(SearchIndexError::ConnectionError(_))
        ));
        assert!(Endpoints::new("mailto:someone@example.com", "kb").is_err());
    }
}
