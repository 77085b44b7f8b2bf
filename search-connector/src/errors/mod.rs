//! Error types for the search connector ingest.

use thiserror::Error;

use search_connector_repository::SearchIndexError;

/// Errors that can occur while extracting records or loading them into the index.
///
/// Every variant is fatal for the run. Benign upstream conditions (an HTTP 400
/// page, an unparsable pagination envelope, an invalid record) are not errors:
/// they are logged and skipped by the fetcher and normalizers.
#[derive(Error, Debug)]
pub enum IngestError {
    /// An upstream page request answered with a non-success status other than 400.
    #[error("Fetching {url} failed with status {status}: {body}")]
    FetchFailed {
        url: String,
        status: u16,
        body: String,
    },

    /// Transport-level failure talking to an upstream API.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// A prerequisite the source depends on could not be found upstream.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// Error from the indexing backend.
    #[error("Sink error: {0}")]
    SinkError(#[from] SearchIndexError),

    /// Error parsing or decoding data.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl IngestError {
    /// Create a fetch failure.
    pub fn fetch_failed(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::FetchFailed {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Create an HTTP transport error.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::HttpError(msg.into())
    }

    /// Create a missing-configuration error.
    pub fn configuration_missing(msg: impl Into<String>) -> Self {
        Self::ConfigurationMissing(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        Self::http(err.to_string())
    }
}

impl From<url::ParseError> for IngestError {
    fn from(err: url::ParseError) -> Self {
        Self::parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_parse_error_becomes_parse_error() {
        let err: IngestError = url::Url::parse("geen url").unwrap_err().into();
        assert!(matches!(err, IngestError::ParseError(_)));
    }

    #[test]
    fn test_http_helper() {
        let err = IngestError::http("connection reset");
        assert_eq!(err.to_string(), "HTTP error: connection reset");
    }
}
