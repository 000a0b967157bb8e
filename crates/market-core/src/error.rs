//! Error types for market-core

use thiserror::Error;

/// Result type alias for market-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The provider returned nothing for the requested symbol or parameters
    #[error("No data available for {0}")]
    NoData(String),

    /// Network failure, malformed provider response or rejected parameters
    #[error("Provider error: {0}")]
    Provider(String),

    /// Tool arguments did not match the tool's input schema
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No tool is registered under the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl Error {
    /// Whether this error means "no data" rather than a failure
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoData("ZZZQQQ".to_string());
        assert_eq!(err.to_string(), "No data available for ZZZQQQ");

        let err = Error::Provider("connection reset".to_string());
        assert_eq!(err.to_string(), "Provider error: connection reset");

        let err = Error::UnknownTool("get_weather".to_string());
        assert_eq!(err.to_string(), "Unknown tool: get_weather");
    }

    #[test]
    fn test_is_no_data() {
        assert!(Error::NoData("AAPL".to_string()).is_no_data());
        assert!(!Error::Provider("timeout".to_string()).is_no_data());
        assert!(!Error::InvalidArguments("symbol".to_string()).is_no_data());
    }
}
