//! Error types for market data operations

use thiserror::Error;

/// Market data specific errors
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// The provider has no data for the requested symbol or parameters
    #[error("No data available for {0}")]
    NoData(String),

    /// Provider answered with an unexpected HTTP status
    #[error("Yahoo Finance returned HTTP {status} for {symbol}")]
    HttpStatus {
        symbol: String,
        status: u16,
    },

    /// Session cookie/crumb could not be obtained or was rejected
    #[error("Yahoo Finance authentication failed: {0}")]
    Authentication(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request URL could not be built
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    Yahoo(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketDataError>;

/// Convert MarketDataError to market_core::Error
///
/// Only "no data" stays distinguishable; everything else is a provider failure.
impl From<MarketDataError> for market_core::Error {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::NoData(subject) => market_core::Error::NoData(subject),
            other => market_core::Error::Provider(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketDataError::NoData("ZZZQQQ".to_string());
        assert_eq!(err.to_string(), "No data available for ZZZQQQ");

        let err = MarketDataError::HttpStatus {
            symbol: "AAPL".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Yahoo Finance returned HTTP 503 for AAPL"
        );
    }

    #[test]
    fn test_error_conversion() {
        let core: market_core::Error = MarketDataError::NoData("AAPL".to_string()).into();
        assert_eq!(core, market_core::Error::NoData("AAPL".to_string()));

        let core: market_core::Error = MarketDataError::Yahoo("bad range".to_string()).into();
        match core {
            market_core::Error::Provider(msg) => {
                assert!(msg.contains("Yahoo Finance error: bad range"));
            },
            _ => panic!("Expected Provider variant"),
        }
    }
}
