//! CleanKit - compact, boilerplate-free page text for LLMs
//!
//! This crate fetches a web page, scans its paragraphs and reduces them to a
//! deduplicated, size-bounded string with a rough token estimate.
//!
//! ## Pipeline
//!
//! The core is [`clean`], a pure function over raw line-separated text.
//! Each line must look like prose ([`looks_like_content`]), must not be
//! site furniture ([`is_boilerplate`]) and must not repeat an earlier line.
//! Survivors are joined with blank lines and bounded to a word budget.
//! Thresholds live in [`CleanConfig`].
//!
//! Fetching ([`Fetcher`], [`HttpFetcher`]) and HTML scanning
//! ([`extract_page`]) wrap the pipeline but never leak into it.

pub mod clean;
pub mod client;
mod convert;
mod error;
pub mod fetchers;
mod tool;
mod types;

pub use clean::{
    clean, clean_with_config, is_boilerplate, looks_like_content, word_count, CleanConfig,
    DEFAULT_DENYLIST,
};
pub use client::{extract, extract_from, extract_with_options, ExtractOptions};
pub use convert::{extract_page, is_html, raw_document, Page};
pub use error::ExtractError;
pub use fetchers::{FetchedPage, Fetcher, HttpFetcher};
pub use tool::{Tool, ToolBuilder};
pub use types::{CleanRequest, CleanResponse, ExtractRequest, ExtractResponse};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "CleanKit/1.0";

/// Tool description for LLM consumption
pub const TOOL_DESCRIPTION: &str = r#"Fetches a web page and returns its paragraph text cleaned for LLM input.

- Keeps only sentence-like lines (50+ chars, 8+ words, terminal punctuation)
- Drops legal notices and calls to action
- Removes exact duplicate lines
- Caps output at 1500 words with a token estimate"#;

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# CleanKit Tool

Fetches a web page, extracts its <p> paragraphs and reduces them to compact,
deduplicated text suitable as LLM context.

## Cleaning Rules
- A line is kept only if it has at least 50 characters, at least 8 words,
  and contains one of `.`, `?`, `!`
- Lines containing "sign up", "newsletter", "all rights reserved",
  "privacy policy", "terms of use", "download the app" or "©"
  (case-insensitive) are dropped
- Exact duplicate lines are kept once, in first-seen order
- Kept lines are separated by a blank line
- Output over 1500 words is cut to 1500 words, joined by single spaces,
  followed by `...`

## Input Parameters
- `url` (required): The URL to fetch (must be http:// or https://)

## Output Fields
- `url`: The fetched URL
- `status_code`: HTTP status code
- `title`: Page title (empty if none)
- `clean_text`: The cleaned text (may be empty)
- `tokens_estimate`: Word count of `clean_text`
- `truncated`: True if the page body was cut short by the read timeout

## Examples

### Extract an article
```json
{"url": "https://example.com/article"}
```

## Error Handling
- Missing or invalid URLs return an error
- Binary content (images, PDFs, archives) returns an error
- Timeouts return cleaned partial content with truncated flag
- A page with no qualifying paragraphs returns empty `clean_text`
"#;
