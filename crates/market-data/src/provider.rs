//! Market data provider abstraction

use async_trait::async_trait;
use market_core::Symbol;

use crate::error::Result;
use crate::models::{Candle, HistoryRequest, NewsItem, TickerInfo};

/// Source of per-symbol market data
///
/// Constructed once at startup and handed to every tool as
/// `Arc<dyn MarketDataProvider>`, so tools can run against a fake in tests.
/// Implementations report a symbol they know nothing about as
/// `MarketDataError::NoData` and never retry failed requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short provider identifier, used in logs
    fn name(&self) -> &'static str;

    /// Quote, profile, statistics and analyst snapshot for one symbol
    async fn ticker_info(&self, symbol: &Symbol) -> Result<TickerInfo>;

    /// OHLCV bars in chronological order
    async fn price_history(&self, request: &HistoryRequest) -> Result<Vec<Candle>>;

    /// Up to `count` recent news articles, newest first
    async fn news(&self, symbol: &Symbol, count: usize) -> Result<Vec<NewsItem>>;
}
