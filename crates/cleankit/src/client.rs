//! Extraction entry points
//!
//! Ties the stages together: validate the URL, fetch the page, scan its
//! paragraphs and run them through the [`clean`](crate::clean) pipeline.

use crate::clean::{clean_with_config, word_count, CleanConfig};
use crate::convert::{extract_page, is_html, raw_document};
use crate::error::ExtractError;
use crate::fetchers::{validate_url, FetchedPage, Fetcher, HttpFetcher};
use crate::types::{ExtractRequest, ExtractResponse};

/// Extraction options that can be configured via tool builder
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Allow list of URL prefixes
    pub allow_prefixes: Vec<String>,
    /// Block list of URL prefixes
    pub block_prefixes: Vec<String>,
    /// Cleaning thresholds and denylist
    pub clean: CleanConfig,
}

/// Extract cleaned text from a URL with default options
pub async fn extract(req: ExtractRequest) -> Result<ExtractResponse, ExtractError> {
    extract_with_options(req, ExtractOptions::default()).await
}

/// Extract cleaned text from a URL with custom options
pub async fn extract_with_options(
    req: ExtractRequest,
    options: ExtractOptions,
) -> Result<ExtractResponse, ExtractError> {
    extract_from(&HttpFetcher::new(), req, &options).await
}

/// Extract cleaned text using the given page source
pub async fn extract_from(
    fetcher: &dyn Fetcher,
    req: ExtractRequest,
    options: &ExtractOptions,
) -> Result<ExtractResponse, ExtractError> {
    let url = validate_url(&req.url, options)?;

    tracing::debug!(fetcher = fetcher.name(), url = %url, "Using fetcher");
    let page = fetcher.fetch(&url, options).await?;

    Ok(build_response(req.url, page, &options.clean))
}

/// Scan and clean a fetched page
///
/// Non-HTML bodies are treated as already extracted text, one paragraph per
/// line.
fn build_response(url: String, page: FetchedPage, config: &CleanConfig) -> ExtractResponse {
    let (title, raw) = if is_html(&page.content_type, &page.body) {
        let scanned = extract_page(&page.body);
        tracing::debug!(paragraphs = scanned.paragraphs.len(), "Scanned page");
        let raw = raw_document(&scanned);
        (scanned.title, raw)
    } else {
        (String::new(), page.body)
    };

    let clean_text = clean_with_config(&raw, config);
    let tokens_estimate = word_count(&clean_text);
    tracing::debug!(tokens_estimate, "Cleaned page");

    ExtractResponse {
        url,
        status_code: page.status_code,
        title,
        clean_text,
        tokens_estimate,
        truncated: page.truncated.then_some(true),
    }
}
