//! Historical OHLCV price tool

use async_trait::async_trait;
use market_core::{Error, Result, Symbol};
use market_tools::{Tool, schema};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::error::MarketDataError;
use crate::models::{DEFAULT_INTERVAL, DEFAULT_PERIOD, HistoryRequest, INTERVALS, PERIODS};
use crate::provider::MarketDataProvider;
use crate::tools::parse_params;

#[derive(Debug, Deserialize)]
struct HistoryParams {
    symbol: Symbol,
    #[serde(default = "default_period")]
    period: String,
    #[serde(default = "default_interval")]
    interval: String,
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

fn default_interval() -> String {
    DEFAULT_INTERVAL.to_string()
}

/// Tool returning OHLCV candles for a symbol
pub struct PriceHistoryTool {
    provider: Arc<dyn MarketDataProvider>,
}

impl PriceHistoryTool {
    /// Create a new price history tool
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for PriceHistoryTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: HistoryParams = parse_params(params)?;
        let request = HistoryRequest::new(params.symbol, params.period, params.interval);

        info!(
            symbol = %request.symbol,
            period = %request.period,
            interval = %request.interval,
            "Fetching price history"
        );
        let candles = self.provider.price_history(&request).await?;

        if candles.is_empty() {
            return Err(Error::NoData(request.symbol.to_string()));
        }

        let history = serde_json::to_value(&candles)
            .map_err(|e| Error::from(MarketDataError::Json(e)))?;

        Ok(json!({
            "symbol": request.symbol,
            "period": request.period,
            "interval": request.interval,
            "data_points": candles.len(),
            "history": history,
        }))
    }

    fn name(&self) -> &str {
        "get_price_history"
    }

    fn description(&self) -> &str {
        "Get historical OHLCV (Open, High, Low, Close, Volume) price data for charting or analysis. \
         Use this for technical analysis, plotting price charts, or analyzing price trends over time. \
         Intraday intervals (1m-1h) are only available for recent periods. \
         Returns an array of candles, each containing date, open, high, low, close, and volume."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::symbol(),
                "period": schema::with_default(
                    schema::with_examples(
                        schema::string("How far back to retrieve data"),
                        PERIODS,
                    ),
                    DEFAULT_PERIOD,
                ),
                "interval": schema::with_default(
                    schema::with_examples(
                        schema::string("Time between data points"),
                        INTERVALS,
                    ),
                    DEFAULT_INTERVAL,
                ),
            }),
            &["symbol"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candle;
    use crate::provider::MockMarketDataProvider;
    use chrono::DateTime;

    fn candle(timestamp: i64, close: f64) -> Candle {
        Candle {
            date: DateTime::from_timestamp(timestamp, 0).unwrap(),
            open: close - 1.0,
            high: close + 1.5,
            low: close - 2.0,
            close,
            volume: 1_000_000,
        }
    }

    #[tokio::test]
    async fn test_history_defaults() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_price_history()
            .withf(|req| {
                req.symbol.as_str() == "AAPL" && req.period == "1mo" && req.interval == "1d"
            })
            .times(1)
            .returning(|_| Ok(vec![candle(1_704_204_000, 185.64), candle(1_704_290_400, 184.25)]));

        let tool = PriceHistoryTool::new(Arc::new(provider));
        let result = tool.execute(json!({"symbol": "aapl"})).await.unwrap();

        assert_eq!(result["symbol"], "AAPL");
        assert_eq!(result["period"], "1mo");
        assert_eq!(result["interval"], "1d");
        assert_eq!(result["data_points"], 2);
        assert_eq!(result["history"][0]["date"], "2024-01-02T14:00:00Z");
        assert_eq!(result["history"][0]["close"], 185.64);
        assert_eq!(result["history"][1]["close"], 184.25);
    }

    #[tokio::test]
    async fn test_history_passes_period_and_interval_through() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_price_history()
            .withf(|req| req.period == "5d" && req.interval == "15m")
            .times(1)
            .returning(|_| Ok(vec![candle(1_704_204_000, 10.0)]));

        let tool = PriceHistoryTool::new(Arc::new(provider));
        let result = tool
            .execute(json!({"symbol": "TSLA", "period": "5d", "interval": "15m"}))
            .await
            .unwrap();

        assert_eq!(result["data_points"], 1);
        assert_eq!(result["interval"], "15m");
    }

    #[tokio::test]
    async fn test_history_empty_is_no_data() {
        let mut provider = MockMarketDataProvider::new();
        provider.expect_price_history().returning(|_| Ok(Vec::new()));

        let tool = PriceHistoryTool::new(Arc::new(provider));
        let err = tool.execute(json!({"symbol": "AAPL"})).await.unwrap_err();

        assert_eq!(err, Error::NoData("AAPL".to_string()));
    }

    #[tokio::test]
    async fn test_history_provider_failure() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_price_history()
            .returning(|_| Err(MarketDataError::Yahoo("invalid interval".to_string())));

        let tool = PriceHistoryTool::new(Arc::new(provider));
        let err = tool
            .execute(json!({"symbol": "AAPL", "interval": "7m"}))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Provider(_)));
    }

    #[test]
    fn test_schema_defaults() {
        let tool = PriceHistoryTool::new(Arc::new(MockMarketDataProvider::new()));
        let schema = tool.input_schema();

        assert_eq!(schema["properties"]["period"]["default"], "1mo");
        assert_eq!(schema["properties"]["interval"]["default"], "1d");
        assert_eq!(schema["required"], json!(["symbol"]));
    }
}
