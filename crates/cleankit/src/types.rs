//! Request and response types for CleanKit

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request to extract cleaned text from a URL
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractRequest {
    /// The URL to fetch (required, must be http:// or https://)
    pub url: String,
}

impl ExtractRequest {
    /// Create a new request with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Cleaned page content
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractResponse {
    /// The fetched URL
    pub url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Page title, empty if the page has none
    pub title: String,

    /// Deduplicated, boilerplate-free paragraph text
    pub clean_text: String,

    /// Whitespace-delimited word count of `clean_text`
    pub tokens_estimate: usize,

    /// True if the page body was cut short by the read timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

/// Request to clean caller-supplied text
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CleanRequest {
    /// Raw text, one candidate line per `\n`
    pub text: String,
}

/// Result of cleaning caller-supplied text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CleanResponse {
    /// Deduplicated, boilerplate-free text
    pub clean_text: String,

    /// Whitespace-delimited word count of `clean_text`
    pub tokens_estimate: usize,
}
