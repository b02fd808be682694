//! Tool builder and contract for CleanKit

use crate::clean::{clean_with_config, word_count, CleanConfig};
use crate::client::{extract_from, ExtractOptions};
use crate::error::ExtractError;
use crate::fetchers::{Fetcher, HttpFetcher};
use crate::types::{CleanRequest, CleanResponse, ExtractRequest, ExtractResponse};
use crate::{TOOL_DESCRIPTION, TOOL_LLMTXT};
use schemars::schema_for;

/// Builder for configuring the CleanKit tool
#[derive(Debug, Clone, Default)]
pub struct ToolBuilder {
    /// Custom User-Agent
    user_agent: Option<String>,
    /// Allow list of URL prefixes
    allow_prefixes: Vec<String>,
    /// Block list of URL prefixes
    block_prefixes: Vec<String>,
    /// Cleaning thresholds and denylist
    clean: CleanConfig,
}

impl ToolBuilder {
    /// Create a new tool builder with default cleaning rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Add URL prefix to allow list
    pub fn allow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.allow_prefixes.push(prefix.into());
        self
    }

    /// Add URL prefix to block list
    pub fn block_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.block_prefixes.push(prefix.into());
        self
    }

    /// Replace the cleaning configuration
    pub fn clean_config(mut self, config: CleanConfig) -> Self {
        self.clean = config;
        self
    }

    /// Build the tool
    pub fn build(self) -> Tool {
        Tool {
            options: ExtractOptions {
                user_agent: self.user_agent,
                allow_prefixes: self.allow_prefixes,
                block_prefixes: self.block_prefixes,
                clean: self.clean,
            },
        }
    }
}

/// Configured CleanKit tool
#[derive(Debug, Clone, Default)]
pub struct Tool {
    options: ExtractOptions,
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Active cleaning configuration
    pub fn clean_config(&self) -> &CleanConfig {
        &self.options.clean
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ExtractRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Get input schema for [`Tool::clean_text`] as JSON
    pub fn clean_input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(CleanRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Get output schema as JSON
    pub fn output_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ExtractResponse);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Fetch the URL over HTTP and clean its paragraphs
    pub async fn execute(&self, req: ExtractRequest) -> Result<ExtractResponse, ExtractError> {
        self.execute_with(&HttpFetcher::new(), req).await
    }

    /// Same as [`Tool::execute`] with a caller-provided page source
    pub async fn execute_with(
        &self,
        fetcher: &dyn Fetcher,
        req: ExtractRequest,
    ) -> Result<ExtractResponse, ExtractError> {
        extract_from(fetcher, req, &self.options).await
    }

    /// Clean caller-supplied text without fetching anything
    pub fn clean_text(&self, req: CleanRequest) -> CleanResponse {
        let clean_text = clean_with_config(&req.text, &self.options.clean);
        let tokens_estimate = word_count(&clean_text);
        CleanResponse {
            clean_text,
            tokens_estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::FetchedPage;
    use async_trait::async_trait;
    use url::Url;

    struct NeverFetcher;

    #[async_trait]
    impl Fetcher for NeverFetcher {
        fn name(&self) -> &'static str {
            "never"
        }

        async fn fetch(
            &self,
            _url: &Url,
            _options: &ExtractOptions,
        ) -> Result<FetchedPage, ExtractError> {
            panic!("fetch must not run for rejected URLs");
        }
    }

    #[test]
    fn test_tool_builder() {
        let tool = Tool::builder()
            .user_agent("TestAgent/1.0")
            .allow_prefix("https://allowed.com")
            .block_prefix("https://blocked.com")
            .clean_config(CleanConfig::default().max_words(10))
            .build();

        assert_eq!(tool.options.user_agent, Some("TestAgent/1.0".to_string()));
        assert_eq!(tool.options.allow_prefixes, vec!["https://allowed.com"]);
        assert_eq!(tool.options.block_prefixes, vec!["https://blocked.com"]);
        assert_eq!(tool.clean_config().max_words, 10);
    }

    #[test]
    fn test_tool_description() {
        let tool = Tool::default();
        assert!(!tool.description().is_empty());
        assert!(!tool.llmtxt().is_empty());
    }

    #[test]
    fn test_tool_schemas() {
        let tool = Tool::default();
        assert!(tool.input_schema()["properties"]["url"].is_object());
        assert!(tool.clean_input_schema()["properties"]["text"].is_object());

        let output_schema = tool.output_schema();
        assert!(output_schema["properties"]["clean_text"].is_object());
        assert!(output_schema["properties"]["tokens_estimate"].is_object());
    }

    #[test]
    fn test_clean_text() {
        let tool = Tool::default();
        let sentence = "The committee met on Tuesday to review the annual budget proposal.";
        let resp = tool.clean_text(CleanRequest {
            text: format!("Home\n{}\n{}", sentence, sentence),
        });
        assert_eq!(resp.clean_text, sentence);
        assert_eq!(resp.tokens_estimate, 11);
    }

    #[test]
    fn test_blocked_url_skips_fetch() {
        let tool = Tool::builder().block_prefix("https://blocked.com").build();
        let result = tokio_test::block_on(
            tool.execute_with(&NeverFetcher, ExtractRequest::new("https://blocked.com/x")),
        );
        assert!(matches!(result, Err(ExtractError::BlockedUrl)));
    }
}
