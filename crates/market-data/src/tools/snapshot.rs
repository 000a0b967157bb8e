//! Tools answering from the per-symbol info snapshot
//!
//! Quote, profile, statistics, valuation, financial health, dividends and
//! analyst targets all come from one provider call and differ only in which
//! fields they report. Each [`InfoView`] is registered as its own tool.

use async_trait::async_trait;
use market_core::{Result, Symbol};
use market_tools::{Tool, schema};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::format::{
    DEFAULT_CURRENCY, UNAVAILABLE, percent_change, price_change, text_or_unavailable,
};
use crate::models::TickerInfo;
use crate::provider::MarketDataProvider;
use crate::tools::{SymbolParams, parse_params};

/// Facet of the info snapshot exposed by an [`InfoTool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoView {
    CurrentQuote,
    CompanyProfile,
    KeyStatistics,
    ValuationMetrics,
    FinancialHealth,
    DividendInfo,
    AnalystTargets,
}

impl InfoView {
    /// Every view, in registration order
    pub const ALL: [InfoView; 7] = [
        InfoView::CurrentQuote,
        InfoView::CompanyProfile,
        InfoView::KeyStatistics,
        InfoView::ValuationMetrics,
        InfoView::FinancialHealth,
        InfoView::DividendInfo,
        InfoView::AnalystTargets,
    ];

    /// Tool name
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::CurrentQuote => "get_current_quote",
            Self::CompanyProfile => "get_company_profile",
            Self::KeyStatistics => "get_key_statistics",
            Self::ValuationMetrics => "get_valuation_metrics",
            Self::FinancialHealth => "get_financial_health",
            Self::DividendInfo => "get_dividend_info",
            Self::AnalystTargets => "get_analyst_targets",
        }
    }

    /// Tool description shown to the host
    pub fn description(self) -> &'static str {
        match self {
            Self::CurrentQuote => {
                "Get the latest real-time quote for a stock including price, change, and volume. \
                 Use this to check the current trading price and today's performance of any stock. \
                 Returns current price, price change (absolute and percent), volume, bid/ask \
                 prices, today's trading range and the 52-week range."
            }
            Self::CompanyProfile => {
                "Get company business description, sector, industry, and corporate details. \
                 Use this to learn what a company does and its industry classification. \
                 Returns name, sector, industry, description, country, website, employee count \
                 and CEO name."
            }
            Self::KeyStatistics => {
                "Get market statistics including market cap, 52-week range, beta, and shares \
                 outstanding. Use this for market sizing, volatility assessment and ownership \
                 structure. Returns market cap, enterprise value, moving averages, float and \
                 short interest data."
            }
            Self::ValuationMetrics => {
                "Get valuation ratios like P/E, P/B, PEG, and EV/EBITDA for fundamental analysis. \
                 Use this to assess if a stock is overvalued or undervalued relative to earnings \
                 and assets."
            }
            Self::FinancialHealth => {
                "Get profitability, margins, returns, and balance sheet health indicators. \
                 Returns profit margins, ROE, ROA, debt-to-equity, current ratio, revenue, \
                 EBITDA, and cash flow metrics."
            }
            Self::DividendInfo => {
                "Get dividend yield, payout ratio, and dividend history details. \
                 Use this to evaluate a stock's income potential and dividend sustainability. \
                 Dates are Unix timestamps in seconds."
            }
            Self::AnalystTargets => {
                "Get Wall Street analyst price targets and buy/sell/hold recommendations. \
                 Returns consensus recommendation, number of analysts, price target (high, low, \
                 mean, median), and upside potential versus the current price."
            }
        }
    }

    /// Shape the snapshot into this view's payload
    pub fn render(self, symbol: &Symbol, info: &TickerInfo) -> Value {
        match self {
            Self::CurrentQuote => render_quote(symbol, info),
            Self::CompanyProfile => render_profile(symbol, info),
            Self::KeyStatistics => render_key_statistics(symbol, info),
            Self::ValuationMetrics => render_valuation(symbol, info),
            Self::FinancialHealth => render_financial_health(symbol, info),
            Self::DividendInfo => render_dividends(symbol, info),
            Self::AnalystTargets => render_analyst_targets(symbol, info),
        }
    }
}

/// Tool serving one [`InfoView`]
pub struct InfoTool {
    view: InfoView,
    provider: Arc<dyn MarketDataProvider>,
}

impl InfoTool {
    /// Create a new info tool
    pub fn new(view: InfoView, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { view, provider }
    }
}

#[async_trait]
impl Tool for InfoTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let SymbolParams { symbol } = parse_params(params)?;

        info!(tool = self.view.tool_name(), %symbol, "Fetching ticker info");
        let info = self.provider.ticker_info(&symbol).await?;

        Ok(self.view.render(&symbol, &info))
    }

    fn name(&self) -> &str {
        self.view.tool_name()
    }

    fn description(&self) -> &str {
        self.view.description()
    }

    fn input_schema(&self) -> Value {
        schema::object(json!({ "symbol": schema::symbol() }), &["symbol"])
    }
}

/// Current quote payload, shared with the batch quote tool
pub fn render_quote(symbol: &Symbol, info: &TickerInfo) -> Value {
    let price = info.price();
    let (change, change_percent) = price_change(price, info.previous_close);

    json!({
        "symbol": symbol,
        "name": info.short_name.as_deref().unwrap_or(UNAVAILABLE),
        "price": price,
        "change": change,
        "change_percent": change_percent,
        "previous_close": info.previous_close,
        "open": info.open.or(info.regular_market_open),
        "day_high": info.day_high.or(info.regular_market_day_high),
        "day_low": info.day_low.or(info.regular_market_day_low),
        "volume": info.volume.or(info.regular_market_volume),
        "bid": info.bid,
        "ask": info.ask,
        "fifty_two_week_high": info.fifty_two_week_high,
        "fifty_two_week_low": info.fifty_two_week_low,
        "currency": info.currency.as_deref().unwrap_or(DEFAULT_CURRENCY),
    })
}

fn render_profile(symbol: &Symbol, info: &TickerInfo) -> Value {
    json!({
        "symbol": symbol,
        "name": text_or_unavailable(info.display_name()),
        "sector": text_or_unavailable(info.sector.as_deref()),
        "industry": text_or_unavailable(info.industry.as_deref()),
        "description": text_or_unavailable(info.long_business_summary.as_deref()),
        "country": text_or_unavailable(info.country.as_deref()),
        "website": text_or_unavailable(info.website.as_deref()),
        "employees": info.full_time_employees,
        "ceo": text_or_unavailable(info.ceo()),
    })
}

fn render_key_statistics(symbol: &Symbol, info: &TickerInfo) -> Value {
    json!({
        "symbol": symbol,
        "market_cap": info.market_cap,
        "enterprise_value": info.enterprise_value,
        "fifty_two_week_high": info.fifty_two_week_high,
        "fifty_two_week_low": info.fifty_two_week_low,
        "fifty_day_average": info.fifty_day_average,
        "two_hundred_day_average": info.two_hundred_day_average,
        "beta": info.beta,
        "shares_outstanding": info.shares_outstanding,
        "float_shares": info.float_shares,
        "short_ratio": info.short_ratio,
        "short_percent_of_float": info.short_percent_of_float,
        "held_percent_insiders": info.held_percent_insiders,
        "held_percent_institutions": info.held_percent_institutions,
    })
}

fn render_valuation(symbol: &Symbol, info: &TickerInfo) -> Value {
    json!({
        "symbol": symbol,
        "trailing_pe": info.trailing_pe,
        "forward_pe": info.forward_pe,
        "peg_ratio": info.peg_ratio,
        "price_to_book": info.price_to_book,
        "price_to_sales": info.price_to_sales,
        "enterprise_to_revenue": info.enterprise_to_revenue,
        "enterprise_to_ebitda": info.enterprise_to_ebitda,
        "trailing_eps": info.trailing_eps,
        "forward_eps": info.forward_eps,
        "book_value": info.book_value,
    })
}

fn render_financial_health(symbol: &Symbol, info: &TickerInfo) -> Value {
    json!({
        "symbol": symbol,
        "profit_margin": info.profit_margins,
        "operating_margin": info.operating_margins,
        "gross_margin": info.gross_margins,
        "return_on_equity": info.return_on_equity,
        "return_on_assets": info.return_on_assets,
        "debt_to_equity": info.debt_to_equity,
        "current_ratio": info.current_ratio,
        "quick_ratio": info.quick_ratio,
        "total_revenue": info.total_revenue,
        "revenue_growth": info.revenue_growth,
        "earnings_growth": info.earnings_growth,
        "ebitda": info.ebitda,
        "free_cash_flow": info.free_cashflow,
        "operating_cash_flow": info.operating_cashflow,
        "total_cash": info.total_cash,
        "total_debt": info.total_debt,
    })
}

fn render_dividends(symbol: &Symbol, info: &TickerInfo) -> Value {
    json!({
        "symbol": symbol,
        "dividend_yield": info.dividend_yield,
        "dividend_rate": info.dividend_rate,
        "payout_ratio": info.payout_ratio,
        "ex_dividend_date": info.ex_dividend_date,
        "last_dividend_value": info.last_dividend_value,
        "last_dividend_date": info.last_dividend_date,
        "five_year_avg_dividend_yield": info.five_year_avg_dividend_yield,
        "trailing_annual_dividend_rate": info.trailing_annual_dividend_rate,
        "trailing_annual_dividend_yield": info.trailing_annual_dividend_yield,
    })
}

fn render_analyst_targets(symbol: &Symbol, info: &TickerInfo) -> Value {
    let current = info.price();

    let mut data = json!({
        "symbol": symbol,
        "recommendation": text_or_unavailable(info.recommendation_key.as_deref()),
        "recommendation_mean": info.recommendation_mean,
        "number_of_analysts": info.number_of_analyst_opinions,
        "target_high": info.target_high_price,
        "target_low": info.target_low_price,
        "target_mean": info.target_mean_price,
        "target_median": info.target_median_price,
        "current_price": current,
    });

    if let Some(upside) = percent_change(current, info.target_mean_price) {
        data["upside_percent"] = json!(upside);
    }

    data
}
