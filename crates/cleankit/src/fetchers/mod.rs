//! Page sources for the extraction flow
//!
//! Design: a [`Fetcher`] turns a validated URL into a [`FetchedPage`].
//! [`HttpFetcher`] is the network implementation; tests and embedders can
//! supply their own to feed HTML from elsewhere.

mod http;

pub use http::HttpFetcher;

use crate::client::ExtractOptions;
use crate::error::ExtractError;
use async_trait::async_trait;
use url::Url;

/// Raw page as delivered by a fetcher
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// The fetched URL
    pub url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// Decoded body text
    pub body: String,
    /// True if the body read stopped at the timeout
    pub truncated: bool,
}

/// Trait for page sources
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Fetch the page at an already validated URL
    async fn fetch(&self, url: &Url, options: &ExtractOptions)
        -> Result<FetchedPage, ExtractError>;
}

/// Validate a request URL against scheme rules and prefix lists
///
/// Runs before any I/O so rejected URLs never reach a fetcher.
pub fn validate_url(url: &str, options: &ExtractOptions) -> Result<Url, ExtractError> {
    if url.is_empty() {
        return Err(ExtractError::MissingUrl);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ExtractError::InvalidUrlScheme);
    }

    let parsed = Url::parse(url).map_err(|_| ExtractError::InvalidUrlScheme)?;

    if !options.allow_prefixes.is_empty()
        && !options
            .allow_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix))
    {
        return Err(ExtractError::BlockedUrl);
    }

    if options
        .block_prefixes
        .iter()
        .any(|prefix| url.starts_with(prefix))
    {
        return Err(ExtractError::BlockedUrl);
    }

    Ok(parsed)
}
