//! Market data for live-market-data
//!
//! This crate fetches quotes, company fundamentals, price history and news
//! from Yahoo Finance and exposes them as MCP tools:
//!
//! - [`provider::MarketDataProvider`]: the seam between tools and the data source
//! - [`api::YahooProvider`]: the Yahoo Finance implementation
//! - [`tools`]: one tool per operation, built by [`tools::market_tools`]
//!
//! # Example
//!
//! ```rust,ignore
//! use market_data::{MarketConfig, YahooProvider, tools::market_tools};
//! use market_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! let config = Arc::new(MarketConfig::default());
//! let provider = Arc::new(YahooProvider::new(&config)?);
//! let registry = ToolRegistry::new().with_tools(market_tools(provider, config));
//!
//! let quote = registry
//!     .invoke("get_current_quote", serde_json::json!({"symbol": "AAPL"}))
//!     .await?;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod provider;
pub mod tools;

pub use api::YahooProvider;
pub use config::MarketConfig;
pub use error::{MarketDataError, Result};
pub use models::{Candle, HistoryRequest, NewsItem, TickerInfo};
pub use provider::MarketDataProvider;
pub use tools::market_tools;
