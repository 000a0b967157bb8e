//! Model Context Protocol (MCP) server for live-market-data
//!
//! This crate exposes a [`market_tools::ToolRegistry`] to MCP hosts:
//! - JSON-RPC 2.0 message handling for `initialize`, `ping`, `tools/list` and `tools/call`,
//!   answered with the `rust_mcp_sdk::schema` types
//! - Newline-delimited stdio transport
//!
//! # Example
//!
//! ```no_run
//! use market_mcp::{McpServer, transport::serve_stdio};
//! use market_tools::ToolRegistry;
//! use market_utils::Config;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(ToolRegistry::new());
//! let server = McpServer::new(registry, &Config::default());
//!
//! // Runs until stdin is closed
//! serve_stdio(&server).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;

// Re-export commonly used types
pub use error::MCPError;
pub use server::McpServer;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, MCPError>;
