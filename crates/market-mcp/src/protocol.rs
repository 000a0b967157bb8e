//! MCP wire types
//!
//! MCP payloads (initialize, tools/list, tools/call) are the typed schema
//! objects from `rust_mcp_sdk::schema`. Only the JSON-RPC envelope lives here,
//! because a parse error has to be answered with `"id": null`, which the
//! schema's `RequestId` cannot express.

use rust_mcp_sdk::schema::{
    CallToolResult, LATEST_PROTOCOL_VERSION, ProtocolVersion, RpcError, TextContent,
    Tool as ToolDefinition, ToolInputSchema,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// JSON-RPC version string
pub const JSONRPC_VERSION: &str = "2.0";

/// Incoming JSON-RPC request or notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Outgoing JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    /// Successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Error response
    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Single text block `tools/call` result
pub fn text_result(text: String, is_error: bool) -> CallToolResult {
    let mut result = CallToolResult::text_content(vec![TextContent::new(text, None, None)]);
    result.is_error = Some(is_error);
    result
}

/// Describe a tool for `tools/list`
///
/// `schema` is the tool's JSON Schema object; its `properties` and `required`
/// members are carried over, anything else is dropped.
pub fn tool_definition(name: &str, description: &str, schema: &Value) -> ToolDefinition {
    let properties: HashMap<String, Map<String, Value>> = schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .filter_map(|(key, value)| Some((key.clone(), value.as_object()?.clone())))
                .collect()
        })
        .unwrap_or_default();

    let required: Vec<String> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|required| {
            required
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    ToolDefinition {
        annotations: None,
        description: Some(description.to_string()),
        input_schema: ToolInputSchema::new(required, Some(properties)),
        meta: None,
        name: name.to_string(),
        output_schema: None,
        title: None,
    }
}

/// Pick the protocol version to answer `initialize` with
///
/// Released versions the client asks for are echoed back; anything else gets
/// the newest one.
pub fn negotiate_protocol_version(requested: &str) -> String {
    match ProtocolVersion::try_from(requested) {
        Ok(ProtocolVersion::Draft) | Err(_) => LATEST_PROTOCOL_VERSION.to_string(),
        Ok(version) => version.to_string(),
    }
}
