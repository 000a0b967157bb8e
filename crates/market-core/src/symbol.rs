//! Ticker symbol type

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A ticker symbol identifying a tradable instrument (e.g. `AAPL`, `BRK-B`, `SHOP.TO`)
///
/// Input is trimmed and uppercased. The only validation is that the result is
/// non-empty; unknown symbols are discovered when the provider has no data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

const EMPTY_SYMBOL: &str = "symbol must not be empty";

impl Symbol {
    /// Parse and normalize a symbol
    pub fn parse(raw: &str) -> Result<Self> {
        Self::normalize(raw).ok_or_else(|| Error::InvalidArguments(EMPTY_SYMBOL.to_string()))
    }

    fn normalize(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_uppercase();
        (!normalized.is_empty()).then_some(Self(normalized))
    }

    /// The normalized symbol text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::normalize(&raw).ok_or_else(|| serde::de::Error::custom(EMPTY_SYMBOL))
    }
}
