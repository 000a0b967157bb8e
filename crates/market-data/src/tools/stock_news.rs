//! Recent news headlines tool

use async_trait::async_trait;
use market_core::{Error, Result, Symbol};
use market_tools::{Tool, schema};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::config::MarketConfig;
use crate::provider::MarketDataProvider;
use crate::tools::parse_params;

#[derive(Debug, Deserialize)]
struct NewsParams {
    symbol: Symbol,
    #[serde(default, alias = "limit")]
    max_articles: Option<i64>,
}

/// Tool returning recent news articles for a symbol
pub struct StockNewsTool {
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<MarketConfig>,
}

impl StockNewsTool {
    /// Create a new news tool
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Arc<MarketConfig>) -> Self {
        Self { provider, config }
    }

    /// Requested article count clamped to `1..=max_news_articles`
    fn article_count(&self, requested: Option<i64>) -> usize {
        let max = self.config.max_news_articles.max(1);
        match requested {
            None => self.config.default_news_articles.clamp(1, max),
            Some(n) if n < 1 => 1,
            Some(n) => usize::try_from(n).unwrap_or(max).min(max),
        }
    }
}

#[async_trait]
impl Tool for StockNewsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: NewsParams = parse_params(params)?;
        let count = self.article_count(params.max_articles);

        info!(symbol = %params.symbol, count, "Fetching news");
        let mut articles = self.provider.news(&params.symbol, count).await?;
        articles.truncate(count);

        if articles.is_empty() {
            return Err(Error::NoData(params.symbol.to_string()));
        }

        let articles: Vec<Value> = articles
            .into_iter()
            .map(|item| {
                json!({
                    "title": item.title,
                    "publisher": item.publisher,
                    "link": item.link,
                    "published": item.published,
                })
            })
            .collect();

        Ok(json!({
            "symbol": params.symbol,
            "article_count": articles.len(),
            "articles": articles,
        }))
    }

    fn name(&self) -> &str {
        "get_stock_news"
    }

    fn description(&self) -> &str {
        "Get recent news headlines and articles about a stock. \
         Use this to stay informed about company events, earnings announcements, and market \
         sentiment. Returns headline, publisher, link, and publish time (Unix seconds) for each \
         article."
    }

    fn input_schema(&self) -> Value {
        let max = i64::try_from(self.config.max_news_articles).unwrap_or(i64::MAX);
        let default = i64::try_from(self.config.default_news_articles).unwrap_or(max);

        schema::object(
            json!({
                "symbol": schema::symbol(),
                "max_articles": schema::with_default(
                    schema::integer("Maximum number of articles to return", 1, max),
                    default,
                ),
            }),
            &["symbol"],
        )
    }
}
