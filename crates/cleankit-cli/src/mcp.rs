//! MCP (Model Context Protocol) server implementation

use cleankit::{CleanRequest, ExtractRequest, Tool, TOOL_DESCRIPTION};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

const EXTRACT_TOOL: &str = "cleankit_extract";
const CLEAN_TOOL: &str = "cleankit_clean";

/// JSON-RPC 2.0 request
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Wrap a tool result as MCP text content
fn text_content(value: &impl Serialize) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": serde_json::to_string_pretty(value).unwrap_or_default()
        }]
    })
}

/// MCP Server implementation
struct McpServer {
    tool: Tool,
}

impl McpServer {
    fn new(tool: Tool) -> Self {
        Self { tool }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "cleankit",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "tools": [
                    {
                        "name": EXTRACT_TOOL,
                        "description": TOOL_DESCRIPTION,
                        "inputSchema": self.tool.input_schema()
                    },
                    {
                        "name": CLEAN_TOOL,
                        "description": "Cleans caller-supplied text with the same rules, without fetching anything.",
                        "inputSchema": self.tool.clean_input_schema()
                    }
                ]
            }),
        )
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        match tool_name {
            EXTRACT_TOOL => {
                let request: ExtractRequest = match serde_json::from_value(arguments) {
                    Ok(req) => req,
                    Err(e) => {
                        return JsonRpcResponse::error(
                            id,
                            -32602,
                            format!("Invalid arguments: {}", e),
                        );
                    }
                };

                match self.tool.execute(request).await {
                    Ok(response) => JsonRpcResponse::success(id, text_content(&response)),
                    Err(e) => JsonRpcResponse::success(
                        id,
                        json!({
                            "content": [{
                                "type": "text",
                                "text": format!("Error: {}", e)
                            }],
                            "isError": true
                        }),
                    ),
                }
            }
            CLEAN_TOOL => match serde_json::from_value::<CleanRequest>(arguments) {
                Ok(request) => {
                    JsonRpcResponse::success(id, text_content(&self.tool.clean_text(request)))
                }
                Err(e) => JsonRpcResponse::error(id, -32602, format!("Invalid arguments: {}", e)),
            },
            _ => JsonRpcResponse::error(id, -32602, format!("Unknown tool: {}", tool_name)),
        }
    }
}

/// Run the MCP server over stdio
pub async fn run_server(tool: Tool) {
    let server = McpServer::new(tool);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!("Error reading stdin: {}", e);
                continue;
            }
        };

        if line.is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                let response = JsonRpcResponse::error(None, -32700, format!("Parse error: {}", e));
                let json = serde_json::to_string(&response).unwrap_or_default();
                let _ = writeln!(stdout, "{}", json);
                let _ = stdout.flush();
                continue;
            }
        };

        // Skip notifications (no id)
        if request.id.is_none() && request.method.starts_with("notifications/") {
            continue;
        }

        tracing::debug!(method = %request.method, "MCP request");
        let response = server.handle_request(request).await;
        let json = serde_json::to_string(&response).unwrap_or_default();
        let _ = writeln!(stdout, "{}", json);
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = McpServer::new(Tool::default());
        let response = server.handle_request(request("tools/list", json!({}))).await;
        let result = response.result.unwrap();

        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(names, vec![EXTRACT_TOOL, CLEAN_TOOL]);
    }

    #[tokio::test]
    async fn test_clean_tool_call() {
        let server = McpServer::new(Tool::default());
        let sentence = "Volunteers planted three hundred trees along the river this spring.";
        let params = json!({
            "name": CLEAN_TOOL,
            "arguments": { "text": format!("Menu\n{}\n{}", sentence, sentence) }
        });

        let response = server.handle_request(request("tools/call", params)).await;
        let text = response.result.unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        let payload: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(payload["clean_text"], sentence);
        assert_eq!(payload["tokens_estimate"], 10);
    }

    #[tokio::test]
    async fn test_extract_tool_error_is_tool_result() {
        let server = McpServer::new(Tool::default());
        let params = json!({ "name": EXTRACT_TOOL, "arguments": { "url": "ftp://x" } });

        let response = server.handle_request(request("tools/call", params)).await;
        let result = response.result.unwrap();

        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Error: Invalid URL"));
    }

    #[tokio::test]
    async fn test_unknown_tool_and_method() {
        let server = McpServer::new(Tool::default());

        let response = server
            .handle_request(request("tools/call", json!({ "name": "other" })))
            .await;
        assert_eq!(response.error.unwrap().code, -32602);

        let response = server.handle_request(request("resources/list", json!({}))).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }
}
