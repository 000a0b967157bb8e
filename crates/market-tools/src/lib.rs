//! Tool management and dispatch for live-market-data
//!
//! This crate provides the `Tool` trait implemented by every market data tool,
//! the `ToolRegistry` that dispatches calls by name, and small JSON Schema
//! builders used to describe tool inputs.

pub mod registry;
pub mod schema;
pub mod tool;

pub use registry::{ToolRegistry, no_data_payload};
pub use tool::Tool;
