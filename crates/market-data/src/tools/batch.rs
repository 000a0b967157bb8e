//! Multi-symbol tools
//!
//! Symbols are fetched one at a time in input order. A failure for one symbol,
//! including an entry that is not a usable symbol, becomes an error slot and
//! the rest of the batch still runs.

use async_trait::async_trait;
use market_core::{Error, Result, Symbol};
use market_tools::{Tool, schema};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::MarketConfig;
use crate::format::{UNAVAILABLE, percent_change};
use crate::models::TickerInfo;
use crate::provider::MarketDataProvider;
use crate::tools::snapshot::render_quote;
use crate::tools::{SymbolsParams, error_slot, parse_params};

/// Read the `symbols` argument and cut it down to `max` entries
///
/// Entries are not parsed here, so one past the limit is never looked at.
fn batch_symbols(params: Value, max: usize) -> Result<Vec<Value>> {
    let SymbolsParams { mut symbols } = parse_params(params)?;

    if symbols.is_empty() {
        return Err(Error::InvalidArguments(
            "symbols must contain at least one ticker".to_string(),
        ));
    }
    if symbols.len() > max {
        warn!(requested = symbols.len(), max, "Truncating symbol list");
        symbols.truncate(max);
    }

    Ok(symbols)
}

fn entry_symbol(entry: &Value) -> Result<Symbol> {
    let raw = entry.as_str().ok_or_else(|| {
        Error::InvalidArguments(format!("symbol must be a string, got {entry}"))
    })?;
    Symbol::parse(raw)
}

/// Fetch each entry in order and render it, or its error slot
async fn fetch_each(
    provider: &dyn MarketDataProvider,
    entries: &[Value],
    render: impl Fn(&Symbol, &TickerInfo) -> Value,
) -> Vec<Value> {
    let mut slots = Vec::with_capacity(entries.len());

    for entry in entries {
        let symbol = match entry_symbol(entry) {
            Ok(symbol) => symbol,
            Err(err) => {
                warn!(%entry, error = %err, "Unusable symbol in batch");
                slots.push(error_slot(entry, &err));
                continue;
            }
        };

        match provider.ticker_info(&symbol).await {
            Ok(info) => slots.push(render(&symbol, &info)),
            Err(e) => {
                let err = Error::from(e);
                if err.is_no_data() {
                    info!(%symbol, "No data for symbol in batch");
                } else {
                    warn!(%symbol, error = %err, "Symbol failed in batch");
                }
                slots.push(error_slot(&symbol, &err));
            }
        }
    }

    slots
}

fn symbols_schema(max: usize) -> Value {
    schema::object(
        json!({
            "symbols": schema::array(
                schema::symbol(),
                "List of stock ticker symbols",
                1,
                max,
            ),
        }),
        &["symbols"],
    )
}

/// Tool returning current quotes for several symbols
pub struct MultipleQuotesTool {
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<MarketConfig>,
}

impl MultipleQuotesTool {
    /// Create a new multi-quote tool
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Arc<MarketConfig>) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl Tool for MultipleQuotesTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let symbols = batch_symbols(params, self.config.max_compare_symbols)?;

        info!(count = symbols.len(), "Fetching quotes");
        let quotes = fetch_each(self.provider.as_ref(), &symbols, render_quote).await;

        Ok(json!({
            "count": quotes.len(),
            "quotes": quotes,
        }))
    }

    fn name(&self) -> &str {
        "get_multiple_quotes"
    }

    fn description(&self) -> &str {
        "Get current quotes for several stocks in one call. \
         Each entry has the same fields as get_current_quote; a symbol that cannot be \
         resolved is reported with an error message instead."
    }

    fn input_schema(&self) -> Value {
        symbols_schema(self.config.max_compare_symbols)
    }
}

/// Tool comparing key metrics side by side
pub struct CompareStocksTool {
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<MarketConfig>,
}

impl CompareStocksTool {
    /// Create a new comparison tool
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Arc<MarketConfig>) -> Self {
        Self { provider, config }
    }
}

fn comparison_row(symbol: &Symbol, info: &TickerInfo) -> Value {
    let price = info.price();

    json!({
        "symbol": symbol,
        "name": info.short_name.as_deref().or(info.long_name.as_deref()).unwrap_or(UNAVAILABLE),
        "price": price,
        "market_cap": info.market_cap,
        "pe_ratio": info.trailing_pe,
        "forward_pe": info.forward_pe,
        "dividend_yield": info.dividend_yield,
        "beta": info.beta,
        "fifty_two_week_high": info.fifty_two_week_high,
        "fifty_two_week_low": info.fifty_two_week_low,
        "percent_from_52w_low": percent_change(info.fifty_two_week_low, price),
        "profit_margin": info.profit_margins,
        "revenue_growth": info.revenue_growth,
    })
}

#[async_trait]
impl Tool for CompareStocksTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let symbols = batch_symbols(params, self.config.max_compare_symbols)?;

        info!(count = symbols.len(), "Comparing stocks");
        let comparison = fetch_each(self.provider.as_ref(), &symbols, comparison_row).await;

        Ok(json!({
            "stocks_compared": comparison.len(),
            "comparison": comparison,
        }))
    }

    fn name(&self) -> &str {
        "compare_stocks"
    }

    fn description(&self) -> &str {
        "Compare key metrics across multiple stocks side-by-side. \
         Use this to evaluate competitors, compare investment options, or screen stocks. \
         Returns price, market cap, P/E ratios, dividend yield, beta, 52-week range, \
         distance from the 52-week low, profit margin, and revenue growth for each stock."
    }

    fn input_schema(&self) -> Value {
        symbols_schema(self.config.max_compare_symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketDataError;
    use crate::provider::MockMarketDataProvider;

    fn info(name: &str, price: f64, low: f64) -> TickerInfo {
        TickerInfo {
            short_name: Some(name.to_string()),
            current_price: Some(price),
            previous_close: Some(price - 1.0),
            fifty_two_week_low: Some(low),
            trailing_pe: Some(30.0),
            ..Default::default()
        }
    }

    fn provider() -> MockMarketDataProvider {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_ticker_info()
            .returning(|symbol| match symbol.as_str() {
                "AAPL" => Ok(info("Apple Inc.", 190.0, 124.17)),
                "MSFT" => Ok(info("Microsoft Corporation", 420.0, 300.0)),
                other => Err(MarketDataError::NoData(other.to_string())),
            });
        provider
    }

    fn config() -> Arc<MarketConfig> {
        Arc::new(MarketConfig::default())
    }

    #[tokio::test]
    async fn test_compare_keeps_order_and_isolates_failures() {
        let tool = CompareStocksTool::new(Arc::new(provider()), config());
        let result = tool
            .execute(json!({"symbols": ["AAPL", "MSFT", "ZZZQQQ"]}))
            .await
            .unwrap();

        assert_eq!(result["stocks_compared"], 3);
        let rows = result["comparison"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["symbol"], "AAPL");
        assert_eq!(rows[0]["pe_ratio"], 30.0);
        assert_eq!(rows[0]["percent_from_52w_low"], 53.02);
        assert_eq!(rows[1]["name"], "Microsoft Corporation");
        assert_eq!(rows[1]["percent_from_52w_low"], 40.0);
        assert_eq!(
            rows[2],
            json!({"symbol": "ZZZQQQ", "error": "No data available for ZZZQQQ"})
        );
    }

    #[tokio::test]
    async fn test_compare_truncates_to_limit() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_ticker_info()
            .times(10)
            .returning(|_| Ok(info("Example", 10.0, 5.0)));

        let symbols: Vec<String> = (0..12).map(|i| format!("T{i}")).collect();
        let tool = CompareStocksTool::new(Arc::new(provider), config());
        let result = tool.execute(json!({"symbols": symbols})).await.unwrap();

        assert_eq!(result["stocks_compared"], 10);
        assert_eq!(result["comparison"][9]["symbol"], "T9");
    }

    #[tokio::test]
    async fn test_unusable_entry_fails_only_its_slot() {
        let tool = CompareStocksTool::new(Arc::new(provider()), config());
        let result = tool
            .execute(json!({"symbols": ["AAPL", "MSFT", ""]}))
            .await
            .unwrap();

        assert_eq!(result["stocks_compared"], 3);
        let rows = result["comparison"].as_array().unwrap();
        assert_eq!(rows[0]["symbol"], "AAPL");
        assert_eq!(rows[1]["symbol"], "MSFT");
        assert_eq!(
            rows[2],
            json!({"symbol": "", "error": "Invalid arguments: symbol must not be empty"})
        );

        let tool = MultipleQuotesTool::new(Arc::new(provider()), config());
        let result = tool
            .execute(json!({"symbols": [42, "aapl", "   "]}))
            .await
            .unwrap();

        assert_eq!(result["count"], 3);
        assert_eq!(result["quotes"][0]["symbol"], 42);
        assert!(
            result["quotes"][0]["error"]
                .as_str()
                .is_some_and(|e| e.contains("must be a string"))
        );
        assert_eq!(result["quotes"][1]["price"], 190.0);
        assert_eq!(result["quotes"][2]["symbol"], "   ");
    }

    #[tokio::test]
    async fn test_entries_past_limit_are_never_parsed() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_ticker_info()
            .times(10)
            .returning(|_| Ok(info("Example", 10.0, 5.0)));

        let mut symbols: Vec<String> = (0..10).map(|i| format!("T{i}")).collect();
        symbols.push(String::new());
        let tool = CompareStocksTool::new(Arc::new(provider), config());
        let result = tool.execute(json!({"symbols": symbols})).await.unwrap();

        assert_eq!(result["stocks_compared"], 10);
        let rows = result["comparison"].as_array().unwrap();
        assert!(rows.iter().all(|row| row.get("error").is_none()));
    }

    #[tokio::test]
    async fn test_compare_keeps_duplicates() {
        let tool = CompareStocksTool::new(Arc::new(provider()), config());
        let result = tool
            .execute(json!({"symbols": ["aapl", "AAPL"]}))
            .await
            .unwrap();

        assert_eq!(result["stocks_compared"], 2);
        assert_eq!(result["comparison"][1]["symbol"], "AAPL");
    }

    #[tokio::test]
    async fn test_empty_symbols_rejected() {
        let tool = CompareStocksTool::new(Arc::new(MockMarketDataProvider::new()), config());
        let err = tool.execute(json!({"symbols": []})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));

        let tool = MultipleQuotesTool::new(Arc::new(MockMarketDataProvider::new()), config());
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));

        let err = tool.execute(json!({"symbols": "AAPL"})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_multiple_quotes() {
        let tool = MultipleQuotesTool::new(Arc::new(provider()), config());
        let result = tool
            .execute(json!({"symbols": ["msft", "ZZZQQQ"]}))
            .await
            .unwrap();

        assert_eq!(result["count"], 2);
        assert_eq!(result["quotes"][0]["symbol"], "MSFT");
        assert_eq!(result["quotes"][0]["price"], 420.0);
        assert_eq!(result["quotes"][0]["change"], 1.0);
        assert_eq!(result["quotes"][1]["error"], "No data available for ZZZQQQ");
    }

    #[test]
    fn test_symbols_schema_limit() {
        let tool = CompareStocksTool::new(Arc::new(MockMarketDataProvider::new()), config());
        let schema = tool.input_schema();
        assert_eq!(schema["properties"]["symbols"]["maxItems"], 10);
        assert_eq!(schema["required"], json!(["symbols"]));
    }
}
