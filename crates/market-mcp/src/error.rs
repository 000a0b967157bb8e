//! Error types for MCP operations

use thiserror::Error;

use rust_mcp_sdk::schema::RpcError;

/// Errors that can occur while serving MCP requests
#[derive(Error, Debug)]
pub enum MCPError {
    /// Message is not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Message is JSON but not a valid JSON-RPC request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Method is not part of the protocol surface we serve
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Request parameters are missing or malformed
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error on the transport
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MCPError {
    /// JSON-RPC error object reported to the client
    pub fn to_rpc_error(&self) -> RpcError {
        let error = match self {
            Self::ParseError(_) => RpcError::parse_error(),
            Self::InvalidRequest(_) => RpcError::invalid_request(),
            Self::MethodNotFound(_) => RpcError::method_not_found(),
            Self::InvalidParams(_) => RpcError::invalid_params(),
            Self::InternalError(_) | Self::JsonError(_) | Self::IoError(_) => {
                RpcError::internal_error()
            }
        };
        error.with_message(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(MCPError::ParseError("x".into()).to_rpc_error().code, -32700);
        assert_eq!(MCPError::InvalidRequest("x".into()).to_rpc_error().code, -32600);
        assert_eq!(MCPError::MethodNotFound("x".into()).to_rpc_error().code, -32601);
        assert_eq!(MCPError::InvalidParams("x".into()).to_rpc_error().code, -32602);
        assert_eq!(MCPError::InternalError("x".into()).to_rpc_error().code, -32603);
    }

    #[test]
    fn test_to_rpc_error() {
        let err = MCPError::MethodNotFound("resources/list".to_string()).to_rpc_error();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "Method not found: resources/list");
        assert!(err.data.is_none());
    }
}
