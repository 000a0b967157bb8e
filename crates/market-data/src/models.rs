//! Market data model
//!
//! Everything here lives for a single request. `TickerInfo` is the typed view
//! of the provider's loosely shaped per-symbol summary: every field is
//! optional and tools decide how an absent value is reported.

use chrono::{DateTime, Utc};
use market_core::Symbol;
use serde::{Deserialize, Serialize};

/// Default look-back period for price history
pub const DEFAULT_PERIOD: &str = "1mo";

/// Default bar size for price history
pub const DEFAULT_INTERVAL: &str = "1d";

/// Periods the provider understands
pub const PERIODS: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

/// Intervals the provider understands; intraday bars only exist for recent periods
pub const INTERVALS: &[&str] = &["1m", "5m", "15m", "30m", "1h", "1d", "1wk", "1mo"];

/// A company officer as listed in the asset profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyOfficer {
    pub name: Option<String>,
    pub title: Option<String>,
}

/// Per-symbol snapshot of quote, profile, statistics and analyst data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    // Identity
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub currency: Option<String>,
    pub quote_type: Option<String>,

    // Trading session
    pub current_price: Option<f64>,
    pub regular_market_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub open: Option<f64>,
    pub regular_market_open: Option<f64>,
    pub day_high: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub regular_market_day_low: Option<f64>,
    pub volume: Option<u64>,
    pub regular_market_volume: Option<u64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,

    // Company profile
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub long_business_summary: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub full_time_employees: Option<u64>,
    pub company_officers: Vec<CompanyOfficer>,

    // Market statistics
    pub market_cap: Option<i64>,
    pub enterprise_value: Option<i64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub fifty_day_average: Option<f64>,
    pub two_hundred_day_average: Option<f64>,
    pub beta: Option<f64>,
    pub shares_outstanding: Option<u64>,
    pub float_shares: Option<u64>,
    pub short_ratio: Option<f64>,
    pub short_percent_of_float: Option<f64>,
    pub held_percent_insiders: Option<f64>,
    pub held_percent_institutions: Option<f64>,

    // Valuation
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub price_to_sales: Option<f64>,
    pub enterprise_to_revenue: Option<f64>,
    pub enterprise_to_ebitda: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub forward_eps: Option<f64>,
    pub book_value: Option<f64>,

    // Financial health
    pub profit_margins: Option<f64>,
    pub operating_margins: Option<f64>,
    pub gross_margins: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub total_revenue: Option<i64>,
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub ebitda: Option<i64>,
    pub free_cashflow: Option<i64>,
    pub operating_cashflow: Option<i64>,
    pub total_cash: Option<i64>,
    pub total_debt: Option<i64>,

    // Dividends (dates are epoch seconds)
    pub dividend_yield: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub ex_dividend_date: Option<i64>,
    pub last_dividend_value: Option<f64>,
    pub last_dividend_date: Option<i64>,
    pub five_year_avg_dividend_yield: Option<f64>,
    pub trailing_annual_dividend_rate: Option<f64>,
    pub trailing_annual_dividend_yield: Option<f64>,

    // Analyst coverage
    pub recommendation_key: Option<String>,
    pub recommendation_mean: Option<f64>,
    pub number_of_analyst_opinions: Option<u64>,
    pub target_high_price: Option<f64>,
    pub target_low_price: Option<f64>,
    pub target_mean_price: Option<f64>,
    pub target_median_price: Option<f64>,
}

impl TickerInfo {
    /// Latest trade price: the current price, else the regular-market price
    pub fn price(&self) -> Option<f64> {
        self.current_price.or(self.regular_market_price)
    }

    /// Display name: the long name, else the short name
    pub fn display_name(&self) -> Option<&str> {
        self.long_name.as_deref().or(self.short_name.as_deref())
    }

    /// Name of the first listed officer, conventionally the CEO
    pub fn ceo(&self) -> Option<&str> {
        self.company_officers
            .first()
            .and_then(|officer| officer.name.as_deref())
    }

    /// Whether the provider returned anything identifying a real instrument
    pub fn has_market_data(&self) -> bool {
        self.price().is_some() || self.short_name.is_some() || self.long_name.is_some()
    }
}

/// Price history request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub period: String,
    pub interval: String,
}

impl HistoryRequest {
    /// Create a request; period and interval are passed through to the provider unchecked
    pub fn new(symbol: Symbol, period: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            symbol,
            period: period.into(),
            interval: interval.into(),
        }
    }
}

/// One OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A news article about a symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub publisher: Option<String>,
    pub link: Option<String>,
    /// Publish time, epoch seconds
    pub published: Option<i64>,
}
