// MCP request dispatcher shared by the stdio and HTTP transports

use crate::error::McpError;
use crate::protocol::*;
use crate::tools::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Stateless dispatcher; cheap to clone into per-request tasks
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
    instructions: Option<String>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            info: ServerInfo {
                name: "yokatlas-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: None,
        }
    }

    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.info = ServerInfo {
            name: name.into(),
            version: version.into(),
        };
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw JSON-RPC message.
    ///
    /// Returns `None` when nothing should be written back (notifications).
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Unparseable JSON-RPC message");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(e)));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid Request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version '{}'",
                    request.jsonrpc
                )),
            ));
        }

        self.handle_request(request).await
    }

    /// Dispatch a decoded request to its method handler
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(Value::Object(Default::default())),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            other => {
                debug!(method = other, "Unknown method");
                Err(JsonRpcError::method_not_found(other))
            }
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => serde_json::from_value(params)
                .map_err(|e| JsonRpcError::invalid_params(format!("Invalid initialize params: {}", e)))?,
            None => InitializeParams::default(),
        };

        let client = params
            .client_info
            .as_ref()
            .map(|c| format!("{} {}", c.name, c.version))
            .unwrap_or_else(|| "unknown".to_string());
        let requested = params.protocol_version.as_deref();
        let protocol_version = negotiate_version(requested).to_string();
        if requested.is_some_and(|v| v != protocol_version) {
            warn!(requested = ?requested, answered = %protocol_version, "Unsupported protocol version requested");
        }
        info!(client = %client, protocol_version = %protocol_version, "Client initialized");

        to_result(InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
            instructions: self.instructions.clone(),
        })
    }

    fn list_tools(&self) -> Result<Value, JsonRpcError> {
        to_result(ListToolsResult {
            tools: self.registry.list_schemas(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| McpError::InvalidParams("tools/call requires params".to_string()))
            .and_then(|p| serde_json::from_value(p).map_err(|e| McpError::InvalidParams(e.to_string())))
            .map_err(|e| JsonRpcError::from(&e))?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::from(&McpError::UnknownTool(params.name.clone())))?;

        let arguments = params
            .arguments
            .unwrap_or_else(|| Value::Object(Default::default()));

        let started = Instant::now();
        let result = tool.execute(arguments).await;
        info!(
            tool = %params.name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Tool call completed"
        );

        to_result(result)
    }
}

fn to_result(value: impl serde::Serialize) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::internal_error(format!("Failed to serialize result: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_server() -> McpServer {
        McpServer::new(ToolRegistry::new())
    }

    #[tokio::test]
    async fn test_initialize_defaults_protocol_version() {
        let response = empty_server()
            .handle_message(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], MCP_VERSION);
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(result["serverInfo"]["name"], "yokatlas-mcp");
    }

    #[tokio::test]
    async fn test_initialize_echoes_client_version() {
        let request = JsonRpcRequest::new(
            1,
            "initialize",
            json!({"protocolVersion": "2025-03-26", "clientInfo": {"name": "inspector", "version": "0.1"}}),
        );
        let response = empty_server().handle_request(request).await.unwrap();
        assert_eq!(response.result.unwrap()["protocolVersion"], "2025-03-26");
    }

    #[tokio::test]
    async fn test_initialize_answers_latest_for_unknown_version() {
        let request = JsonRpcRequest::new(1, "initialize", json!({"protocolVersion": "1999-01-01"}));
        let response = empty_server().handle_request(request).await.unwrap();
        assert_eq!(response.result.unwrap()["protocolVersion"], MCP_VERSION);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let response = empty_server()
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = empty_server().handle_message("{not json").await.unwrap();
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, JsonRpcError::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_request_keeps_id() {
        let response = empty_server()
            .handle_message(r#"{"jsonrpc":"2.0","id":"a"}"#)
            .await
            .unwrap();
        assert_eq!(response.id, json!("a"));
        assert_eq!(response.error.unwrap().code, JsonRpcError::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = empty_server()
            .handle_request(JsonRpcRequest::new(3, "resources/list", json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let response = empty_server()
            .handle_request(JsonRpcRequest::new(
                4,
                "tools/call",
                json!({"name": "get_weather", "arguments": {}}),
            ))
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, JsonRpcError::INVALID_PARAMS);
        assert!(error.message.contains("get_weather"));
    }

    #[tokio::test]
    async fn test_ping() {
        let response = empty_server()
            .handle_request(JsonRpcRequest::new(5, "ping", json!({})))
            .await
            .unwrap();
        assert_eq!(response.result.unwrap(), json!({}));
    }
}
