//! Error types for CleanKit

use thiserror::Error;

/// Errors that can occur while fetching and extracting a page
///
/// The cleaning pipeline itself never fails; these cover the
/// request validation and fetch stages around it.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// URL is blocked by prefix list
    #[error("Blocked URL: prefix not allowed")]
    BlockedUrl,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out waiting for first byte
    #[error("Request timed out: server did not respond within 1 second")]
    FirstByteTimeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Response body can't be scanned for paragraphs
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),
}

impl ExtractError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExtractError::FirstByteTimeout
        } else if err.is_connect() {
            ExtractError::ConnectError(err)
        } else {
            ExtractError::RequestError(err.to_string())
        }
    }

    /// True for errors caused by the request itself rather than the remote page
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            ExtractError::MissingUrl | ExtractError::InvalidUrlScheme | ExtractError::BlockedUrl
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExtractError::MissingUrl.to_string(),
            "Missing required parameter: url"
        );
        assert_eq!(
            ExtractError::InvalidUrlScheme.to_string(),
            "Invalid URL: must start with http:// or https://"
        );
        assert_eq!(
            ExtractError::BlockedUrl.to_string(),
            "Blocked URL: prefix not allowed"
        );
        assert_eq!(
            ExtractError::FirstByteTimeout.to_string(),
            "Request timed out: server did not respond within 1 second"
        );
        assert_eq!(
            ExtractError::UnsupportedContent("image/png".to_string()).to_string(),
            "Unsupported content type: image/png"
        );
    }

    #[test]
    fn test_is_invalid_request() {
        assert!(ExtractError::MissingUrl.is_invalid_request());
        assert!(ExtractError::BlockedUrl.is_invalid_request());
        assert!(!ExtractError::FirstByteTimeout.is_invalid_request());
        assert!(!ExtractError::RequestError("boom".to_string()).is_invalid_request());
    }
}
