//! Configuration for market data operations

use crate::error::{MarketDataError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "LIVE_MARKET_DATA_TIMEOUT_SECS";

/// Environment variable overriding the HTTP user agent
pub const USER_AGENT_ENV: &str = "LIVE_MARKET_DATA_USER_AGENT";

/// Browser-like user agent; Yahoo rejects some default client agents
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Configuration for market data operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Request timeout for every provider call
    pub request_timeout: Duration,

    /// User agent sent to the provider
    pub user_agent: String,

    /// News articles returned when the caller does not ask for a count
    pub default_news_articles: usize,

    /// Upper bound on news articles per call
    pub max_news_articles: usize,

    /// Upper bound on symbols per batch call (quotes, comparison)
    pub max_compare_symbols: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_news_articles: 10,
            max_news_articles: 25,
            max_compare_symbols: 10,
        }
    }
}

impl MarketConfig {
    /// Create a new configuration builder
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(MarketDataError::Config(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_news_articles == 0 || self.max_compare_symbols == 0 {
            return Err(MarketDataError::Config(
                "limits must be greater than 0".to_string(),
            ));
        }

        if self.default_news_articles == 0 || self.default_news_articles > self.max_news_articles
        {
            return Err(MarketDataError::Config(format!(
                "default_news_articles must be between 1 and {}",
                self.max_news_articles
            )));
        }

        Ok(())
    }
}

/// Builder for MarketConfig
///
/// Also the on-disk format: a JSON file with camelCase keys, e.g.
///
/// ```json
/// { "requestTimeoutSecs": 10, "maxNewsArticles": 20 }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarketConfigBuilder {
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
    default_news_articles: Option<usize>,
    max_news_articles: Option<usize>,
    max_compare_symbols: Option<usize>,
}

impl MarketConfigBuilder {
    /// Start from a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MarketDataError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            MarketDataError::Config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout_secs = Some(duration.as_secs());
        self
    }

    /// Set the HTTP user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the default news article count
    pub fn default_news_articles(mut self, count: usize) -> Self {
        self.default_news_articles = Some(count);
        self
    }

    /// Set the maximum news article count
    pub fn max_news_articles(mut self, count: usize) -> Self {
        self.max_news_articles = Some(count);
        self
    }

    /// Set the maximum symbols per batch call
    pub fn max_compare_symbols(mut self, count: usize) -> Self {
        self.max_compare_symbols = Some(count);
        self
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an environment lookup function
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                MarketDataError::Config(format!("{TIMEOUT_ENV}='{raw}' is not a number: {e}"))
            })?;
            self.request_timeout_secs = Some(secs);
        }

        if let Some(user_agent) = lookup(USER_AGENT_ENV) {
            self.user_agent = Some(user_agent);
        }

        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<MarketConfig> {
        let defaults = MarketConfig::default();

        let config = MarketConfig {
            request_timeout: self
                .request_timeout_secs
                .map_or(defaults.request_timeout, Duration::from_secs),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            default_news_articles: self
                .default_news_articles
                .unwrap_or(defaults.default_news_articles),
            max_news_articles: self.max_news_articles.unwrap_or(defaults.max_news_articles),
            max_compare_symbols: self
                .max_compare_symbols
                .unwrap_or(defaults.max_compare_symbols),
        };

        config.validate()?;
        Ok(config)
    }
}
