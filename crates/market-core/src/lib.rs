//! Core types for live-market-data
//!
//! This crate defines the error model and the ticker symbol type shared by the
//! tool framework, the market data providers and the MCP server.

pub mod error;
pub mod symbol;

pub use error::{Error, Result};
pub use symbol::Symbol;
