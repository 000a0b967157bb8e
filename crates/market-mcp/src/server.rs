//! MCP request handling
//!
//! [`McpServer`] turns one raw JSON-RPC message into at most one response.
//! It is transport-agnostic; see [`crate::transport`] for the stdio loop.

use market_tools::ToolRegistry;
use market_utils::Config;
use rust_mcp_sdk::schema::{
    CallToolRequestParams, Implementation, InitializeRequestParams, InitializeResult,
    ListToolsResult, ServerCapabilities, ServerCapabilitiesTools,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::MCPError;
use crate::protocol::{
    JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse, negotiate_protocol_version, text_result,
    tool_definition,
};

/// Tools-only MCP server over a [`ToolRegistry`]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: Implementation,
}

impl McpServer {
    /// Create a server reporting `config`'s name and version to clients
    pub fn new(registry: Arc<ToolRegistry>, config: &Config) -> Self {
        Self {
            registry,
            info: Implementation {
                name: config.app_name.clone(),
                title: None,
                version: config.version.clone(),
            },
        }
    }

    /// Number of tools served
    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }

    /// Handle one raw message
    ///
    /// Returns `None` for notifications. Every other message yields exactly
    /// one response, an error response when the message is malformed.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Discarding unparseable message");
                let err = MCPError::ParseError(e.to_string());
                return Some(JsonRpcResponse::failure(Value::Null, err.to_rpc_error()));
            }
        };

        // A present `id`, even `null`, marks a request
        let is_notification = value.get("id").is_none();

        let request = match Self::parse_request(value) {
            Ok(request) => request,
            Err((id, err)) => {
                warn!(error = %err, "Rejecting invalid request");
                return Some(JsonRpcResponse::failure(id, err.to_rpc_error()));
            }
        };

        if is_notification {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        match self.dispatch(&request.method, request.params).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(err) => {
                warn!(method = %request.method, error = %err, "Request failed");
                Some(JsonRpcResponse::failure(id, err.to_rpc_error()))
            }
        }
    }

    fn parse_request(value: Value) -> std::result::Result<JsonRpcRequest, (Value, MCPError)> {
        let id = value.get("id").cloned().unwrap_or(Value::Null);

        if !value.is_object() {
            return Err((
                id,
                MCPError::InvalidRequest("message must be a JSON object".to_string()),
            ));
        }

        let request: JsonRpcRequest = serde_json::from_value(value)
            .map_err(|e| (id.clone(), MCPError::InvalidRequest(e.to_string())))?;

        if request.jsonrpc != JSONRPC_VERSION {
            return Err((
                id,
                MCPError::InvalidRequest(format!(
                    "unsupported jsonrpc version '{}'",
                    request.jsonrpc
                )),
            ));
        }

        Ok(request)
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value> {
        match method {
            "initialize" => self.initialize(params),
            "ping" => Ok(json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(params).await,
            other => Err(MCPError::MethodNotFound(other.to_string())),
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value> {
        let params: InitializeRequestParams = parse_params(
            params.ok_or_else(|| MCPError::InvalidParams("missing initialize params".to_string()))?,
        )?;

        let protocol_version = negotiate_protocol_version(&params.protocol_version);
        info!(
            client = %params.client_info.name,
            requested = %params.protocol_version,
            %protocol_version,
            "Client initialized"
        );

        let result = InitializeResult {
            capabilities: ServerCapabilities {
                tools: Some(ServerCapabilitiesTools {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            instructions: None,
            meta: None,
            protocol_version,
            server_info: self.info.clone(),
        };

        Ok(serde_json::to_value(result)?)
    }

    fn list_tools(&self) -> Result<Value> {
        let tools: Vec<_> = self
            .registry
            .list_tools()
            .iter()
            .map(|tool| tool_definition(tool.name(), tool.description(), &tool.input_schema()))
            .collect();

        let result = ListToolsResult {
            meta: None,
            next_cursor: None,
            tools,
        };

        Ok(serde_json::to_value(result)?)
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value> {
        let params: CallToolRequestParams = parse_params(
            params.ok_or_else(|| MCPError::InvalidParams("missing tool call params".to_string()))?,
        )?;
        let arguments = params.arguments.map(Value::Object).unwrap_or_else(|| json!({}));

        info!(tool = %params.name, "Calling tool");

        let result = match self.registry.invoke(&params.name, arguments).await {
            Ok(payload) => text_result(serde_json::to_string_pretty(&payload)?, false),
            Err(market_core::Error::UnknownTool(name)) => {
                return Err(MCPError::InvalidParams(format!("Unknown tool: {name}")));
            }
            Err(err) => {
                warn!(tool = %params.name, error = %err, "Tool call failed");
                text_result(err.to_string(), true)
            }
        };

        Ok(serde_json::to_value(result)?)
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| MCPError::InvalidParams(e.to_string()))
}
