//! Yahoo Finance market data provider.
//!
//! - `ticker_info`: the `quoteSummary` endpoint, which needs a session cookie
//!   plus crumb. The pair is fetched lazily and kept on the provider.
//! - `price_history`: the chart endpoint through `yahoo_finance_api`.
//! - `news`: the public search endpoint.
//!
//! Nothing is retried. A rejected crumb is dropped so the next call fetches a
//! fresh one.

mod models;

use async_trait::async_trait;
use chrono::DateTime;
use market_core::Symbol;
use reqwest::{StatusCode, header};
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;
use yahoo_finance_api as yahoo;

use crate::config::MarketConfig;
use crate::error::{MarketDataError, Result};
use crate::format::round2;
use crate::models::{Candle, HistoryRequest, NewsItem, TickerInfo};
use crate::provider::MarketDataProvider;

pub use models::{YahooQuoteSummaryResponse, YahooSearchResponse};

const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary/";
const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";
const SUMMARY_MODULES: &str =
    "price,summaryDetail,defaultKeyStatistics,financialData,assetProfile";

/// Yahoo session credentials
#[derive(Debug, Clone)]
struct Crumb {
    cookie: String,
    crumb: String,
}

/// Yahoo Finance market data provider
pub struct YahooProvider {
    http: reqwest::Client,
    connector: yahoo::YahooConnector,
    crumb: RwLock<Option<Crumb>>,
}

/// Chart connector sharing the provider's timeout and user agent
fn chart_connector(config: &MarketConfig) -> Result<yahoo::YahooConnector> {
    yahoo::YahooConnector::builder()
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| MarketDataError::Yahoo(format!("Failed to initialize Yahoo connector: {e}")))
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider
    pub fn new(config: &MarketConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            connector: chart_connector(config)?,
            crumb: RwLock::new(None),
        })
    }

    /// Return the cached crumb or fetch a new one
    async fn ensure_crumb(&self) -> Result<Crumb> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        let crumb = self.fetch_crumb().await?;
        *self.crumb.write().await = Some(crumb.clone());
        Ok(crumb)
    }

    /// Fetch a new cookie and crumb pair
    async fn fetch_crumb(&self) -> Result<Crumb> {
        debug!("Fetching Yahoo session crumb");

        // fc.yahoo.com answers 404 but still sets the session cookie
        let response = self.http.get(COOKIE_URL).send().await?;
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| {
                MarketDataError::Authentication("no session cookie in response".to_string())
            })?;

        let response = self
            .http
            .get(CRUMB_URL)
            .header(header::COOKIE, &cookie)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketDataError::Authentication(format!(
                "crumb request returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(MarketDataError::Authentication(
                "crumb response was empty or not plain text".to_string(),
            ));
        }

        Ok(Crumb { cookie, crumb })
    }

    /// Drop the cached crumb after Yahoo rejected it
    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    fn quote_summary_url(symbol: &Symbol, crumb: &str) -> Result<Url> {
        let mut url = Url::parse(QUOTE_SUMMARY_URL)?;
        url.path_segments_mut()
            .map_err(|()| MarketDataError::Yahoo("quoteSummary URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(symbol.as_str());
        url.query_pairs_mut()
            .append_pair("modules", SUMMARY_MODULES)
            .append_pair("crumb", crumb);
        Ok(url)
    }

    fn search_url(symbol: &Symbol, count: usize) -> Result<Url> {
        Ok(Url::parse_with_params(
            SEARCH_URL,
            &[
                ("q", symbol.as_str()),
                ("quotesCount", "0"),
                ("newsCount", &count.to_string()),
                ("enableFuzzyQuery", "false"),
            ],
        )?)
    }

    /// Map a connector error, keeping "nothing there" apart from real failures
    fn map_connector_error(symbol: &Symbol, error: &yahoo::YahooError) -> MarketDataError {
        if matches!(error, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            return MarketDataError::NoData(symbol.to_string());
        }

        let message = error.to_string();
        let lowered = message.to_lowercase();
        if ["not found", "no data found", "404"]
            .iter()
            .any(|needle| lowered.contains(needle))
        {
            MarketDataError::NoData(symbol.to_string())
        } else {
            MarketDataError::Yahoo(message)
        }
    }
}

/// Keep articles with a headline, drop repeated headlines, keep order
fn clean_news(items: Vec<models::YahooNewsItem>, count: usize) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|item| {
            let title = item.title.into_inner()?.trim().to_string();
            if title.is_empty() {
                return None;
            }
            seen.insert(title.to_lowercase()).then(|| NewsItem {
                title,
                publisher: item.publisher.into_inner(),
                link: item.link.into_inner(),
                published: item.provider_publish_time.int(),
            })
        })
        .take(count)
        .collect()
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn ticker_info(&self, symbol: &Symbol) -> Result<TickerInfo> {
        let crumb = self.ensure_crumb().await?;
        let url = Self::quote_summary_url(symbol, &crumb.crumb)?;

        debug!("Fetching quote summary for {}", symbol);

        let response = self
            .http
            .get(url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                self.clear_crumb().await;
                return Err(MarketDataError::Authentication(format!(
                    "session rejected while fetching {symbol}"
                )));
            }
            StatusCode::NOT_FOUND => return Err(MarketDataError::NoData(symbol.to_string())),
            status if !status.is_success() => {
                return Err(MarketDataError::HttpStatus {
                    symbol: symbol.to_string(),
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        let data: YahooQuoteSummaryResponse = serde_json::from_str(&body)?;

        if let Some(error) = data.quote_summary.error {
            if error.is_not_found() {
                return Err(MarketDataError::NoData(symbol.to_string()));
            }
            return Err(MarketDataError::Yahoo(error.message()));
        }

        let info = data
            .quote_summary
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(models::YahooQuoteSummaryResult::into_ticker_info)
            .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;

        if info.has_market_data() {
            Ok(info)
        } else {
            Err(MarketDataError::NoData(symbol.to_string()))
        }
    }

    async fn price_history(&self, request: &HistoryRequest) -> Result<Vec<Candle>> {
        let symbol = &request.symbol;

        debug!(
            "Fetching {} history for {} at {} interval",
            request.period, symbol, request.interval
        );

        let response = self
            .connector
            .get_quote_range(symbol.as_str(), &request.interval, &request.period)
            .await
            .map_err(|e| Self::map_connector_error(symbol, &e))?;

        let quotes = response
            .quotes()
            .map_err(|e| Self::map_connector_error(symbol, &e))?;

        let candles: Vec<Candle> = quotes
            .into_iter()
            .filter_map(|q| {
                let timestamp = i64::try_from(q.timestamp).ok();
                let Some(date) = timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)) else {
                    warn!("Skipping bar with invalid timestamp for {}", symbol);
                    return None;
                };
                Some(Candle {
                    date,
                    open: round2(q.open),
                    high: round2(q.high),
                    low: round2(q.low),
                    close: round2(q.close),
                    volume: q.volume,
                })
            })
            .collect();

        if candles.is_empty() {
            return Err(MarketDataError::NoData(symbol.to_string()));
        }

        Ok(candles)
    }

    async fn news(&self, symbol: &Symbol, count: usize) -> Result<Vec<NewsItem>> {
        let url = Self::search_url(symbol, count)?;

        debug!("Fetching up to {} news articles for {}", count, symbol);

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(MarketDataError::HttpStatus {
                symbol: symbol.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let data: YahooSearchResponse = serde_json::from_str(&body)?;

        Ok(clean_news(data.news, count))
    }
}
