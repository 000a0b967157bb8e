//! Yahoo Finance API response models.
//!
//! Yahoo reports numbers as `{"raw": 1.5, "fmt": "1.50"}`, as bare numbers, or
//! as `{}` when it has nothing. `YahooValue` and `YahooText` accept every
//! shape and treat anything unexpected as missing, so schema drift in one
//! field never fails the whole response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{CompanyOfficer, TickerInfo};

/// Numeric field in any of Yahoo's encodings
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct YahooValue(pub Option<f64>);

impl YahooValue {
    pub fn float(self) -> Option<f64> {
        self.0.filter(|v| v.is_finite())
    }

    pub fn int(self) -> Option<i64> {
        self.float().map(|v| v.round() as i64)
    }

    pub fn count(self) -> Option<u64> {
        self.float().filter(|v| *v >= 0.0).map(|v| v.round() as u64)
    }
}

impl<'de> Deserialize<'de> for YahooValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(match value {
            Value::Number(n) => n.as_f64(),
            Value::Object(map) => map.get("raw").and_then(Value::as_f64),
            _ => None,
        }))
    }
}

/// Text field; empty strings and non-strings count as missing
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct YahooText(pub Option<String>);

impl YahooText {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl<'de> Deserialize<'de> for YahooText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(match value {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }))
    }
}

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct YahooQuoteSummary {
    pub result: Option<Vec<YahooQuoteSummaryResult>>,
    pub error: Option<YahooApiError>,
}

/// Error object Yahoo embeds in otherwise well-formed responses
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct YahooApiError {
    pub code: YahooText,
    pub description: YahooText,
}

impl YahooApiError {
    pub fn is_not_found(&self) -> bool {
        self.code
            .0
            .as_deref()
            .is_some_and(|code| code.eq_ignore_ascii_case("not found"))
    }

    pub fn message(&self) -> String {
        self.description
            .0
            .clone()
            .or_else(|| self.code.0.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

/// Individual result from quoteSummary API
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPrice>,
    pub summary_detail: Option<YahooSummaryDetail>,
    pub default_key_statistics: Option<YahooKeyStatistics>,
    pub financial_data: Option<YahooFinancialData>,
    pub asset_profile: Option<YahooAssetProfile>,
}

/// `price` module
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YahooPrice {
    pub short_name: YahooText,
    pub long_name: YahooText,
    pub currency: YahooText,
    pub quote_type: YahooText,
    pub regular_market_price: YahooValue,
    pub regular_market_previous_close: YahooValue,
    pub regular_market_open: YahooValue,
    pub regular_market_day_high: YahooValue,
    pub regular_market_day_low: YahooValue,
    pub regular_market_volume: YahooValue,
}

/// `summaryDetail` module
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YahooSummaryDetail {
    pub currency: YahooText,
    pub previous_close: YahooValue,
    pub open: YahooValue,
    pub day_high: YahooValue,
    pub day_low: YahooValue,
    pub volume: YahooValue,
    pub bid: YahooValue,
    pub ask: YahooValue,
    pub market_cap: YahooValue,
    pub fifty_two_week_high: YahooValue,
    pub fifty_two_week_low: YahooValue,
    pub fifty_day_average: YahooValue,
    pub two_hundred_day_average: YahooValue,
    pub beta: YahooValue,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: YahooValue,
    #[serde(rename = "forwardPE")]
    pub forward_pe: YahooValue,
    #[serde(rename = "priceToSalesTrailing12Months")]
    pub price_to_sales: YahooValue,
    pub dividend_yield: YahooValue,
    pub dividend_rate: YahooValue,
    pub payout_ratio: YahooValue,
    pub ex_dividend_date: YahooValue,
    pub five_year_avg_dividend_yield: YahooValue,
    pub trailing_annual_dividend_rate: YahooValue,
    pub trailing_annual_dividend_yield: YahooValue,
}

/// `defaultKeyStatistics` module
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YahooKeyStatistics {
    pub enterprise_value: YahooValue,
    pub shares_outstanding: YahooValue,
    pub float_shares: YahooValue,
    pub short_ratio: YahooValue,
    pub short_percent_of_float: YahooValue,
    pub held_percent_insiders: YahooValue,
    pub held_percent_institutions: YahooValue,
    pub peg_ratio: YahooValue,
    pub price_to_book: YahooValue,
    pub enterprise_to_revenue: YahooValue,
    pub enterprise_to_ebitda: YahooValue,
    pub trailing_eps: YahooValue,
    pub forward_eps: YahooValue,
    pub book_value: YahooValue,
    pub last_dividend_value: YahooValue,
    pub last_dividend_date: YahooValue,
    pub beta: YahooValue,
}

/// `financialData` module
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YahooFinancialData {
    pub current_price: YahooValue,
    pub target_high_price: YahooValue,
    pub target_low_price: YahooValue,
    pub target_mean_price: YahooValue,
    pub target_median_price: YahooValue,
    pub recommendation_mean: YahooValue,
    pub recommendation_key: YahooText,
    pub number_of_analyst_opinions: YahooValue,
    pub total_cash: YahooValue,
    pub total_debt: YahooValue,
    pub ebitda: YahooValue,
    pub total_revenue: YahooValue,
    pub debt_to_equity: YahooValue,
    pub current_ratio: YahooValue,
    pub quick_ratio: YahooValue,
    pub return_on_assets: YahooValue,
    pub return_on_equity: YahooValue,
    pub revenue_growth: YahooValue,
    pub earnings_growth: YahooValue,
    pub gross_margins: YahooValue,
    pub operating_margins: YahooValue,
    pub profit_margins: YahooValue,
    pub free_cashflow: YahooValue,
    pub operating_cashflow: YahooValue,
}

/// `assetProfile` module
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YahooAssetProfile {
    pub sector: YahooText,
    pub industry: YahooText,
    pub long_business_summary: YahooText,
    pub country: YahooText,
    pub website: YahooText,
    pub full_time_employees: YahooValue,
    pub company_officers: Vec<YahooOfficer>,
}

/// Entry of `assetProfile.companyOfficers`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct YahooOfficer {
    pub name: YahooText,
    pub title: YahooText,
}

impl YahooQuoteSummaryResult {
    /// Flatten the modules into a `TickerInfo`
    ///
    /// Where two modules carry the same figure the summary detail wins and the
    /// `price` module's regular-market value is kept as a fallback.
    pub fn into_ticker_info(self) -> TickerInfo {
        let price = self.price.unwrap_or_default();
        let detail = self.summary_detail.unwrap_or_default();
        let stats = self.default_key_statistics.unwrap_or_default();
        let financial = self.financial_data.unwrap_or_default();
        let profile = self.asset_profile.unwrap_or_default();

        TickerInfo {
            short_name: price.short_name.into_inner(),
            long_name: price.long_name.into_inner(),
            currency: price.currency.into_inner().or(detail.currency.into_inner()),
            quote_type: price.quote_type.into_inner(),

            current_price: financial.current_price.float(),
            regular_market_price: price.regular_market_price.float(),
            previous_close: detail
                .previous_close
                .float()
                .or(price.regular_market_previous_close.float()),
            open: detail.open.float(),
            regular_market_open: price.regular_market_open.float(),
            day_high: detail.day_high.float(),
            regular_market_day_high: price.regular_market_day_high.float(),
            day_low: detail.day_low.float(),
            regular_market_day_low: price.regular_market_day_low.float(),
            volume: detail.volume.count(),
            regular_market_volume: price.regular_market_volume.count(),
            bid: detail.bid.float(),
            ask: detail.ask.float(),

            sector: profile.sector.into_inner(),
            industry: profile.industry.into_inner(),
            long_business_summary: profile.long_business_summary.into_inner(),
            country: profile.country.into_inner(),
            website: profile.website.into_inner(),
            full_time_employees: profile.full_time_employees.count(),
            company_officers: profile
                .company_officers
                .into_iter()
                .map(|officer| CompanyOfficer {
                    name: officer.name.into_inner(),
                    title: officer.title.into_inner(),
                })
                .collect(),

            market_cap: detail.market_cap.int(),
            enterprise_value: stats.enterprise_value.int(),
            fifty_two_week_high: detail.fifty_two_week_high.float(),
            fifty_two_week_low: detail.fifty_two_week_low.float(),
            fifty_day_average: detail.fifty_day_average.float(),
            two_hundred_day_average: detail.two_hundred_day_average.float(),
            beta: detail.beta.float().or(stats.beta.float()),
            shares_outstanding: stats.shares_outstanding.count(),
            float_shares: stats.float_shares.count(),
            short_ratio: stats.short_ratio.float(),
            short_percent_of_float: stats.short_percent_of_float.float(),
            held_percent_insiders: stats.held_percent_insiders.float(),
            held_percent_institutions: stats.held_percent_institutions.float(),

            trailing_pe: detail.trailing_pe.float(),
            forward_pe: detail.forward_pe.float(),
            peg_ratio: stats.peg_ratio.float(),
            price_to_book: stats.price_to_book.float(),
            price_to_sales: detail.price_to_sales.float(),
            enterprise_to_revenue: stats.enterprise_to_revenue.float(),
            enterprise_to_ebitda: stats.enterprise_to_ebitda.float(),
            trailing_eps: stats.trailing_eps.float(),
            forward_eps: stats.forward_eps.float(),
            book_value: stats.book_value.float(),

            profit_margins: financial.profit_margins.float(),
            operating_margins: financial.operating_margins.float(),
            gross_margins: financial.gross_margins.float(),
            return_on_equity: financial.return_on_equity.float(),
            return_on_assets: financial.return_on_assets.float(),
            debt_to_equity: financial.debt_to_equity.float(),
            current_ratio: financial.current_ratio.float(),
            quick_ratio: financial.quick_ratio.float(),
            total_revenue: financial.total_revenue.int(),
            revenue_growth: financial.revenue_growth.float(),
            earnings_growth: financial.earnings_growth.float(),
            ebitda: financial.ebitda.int(),
            free_cashflow: financial.free_cashflow.int(),
            operating_cashflow: financial.operating_cashflow.int(),
            total_cash: financial.total_cash.int(),
            total_debt: financial.total_debt.int(),

            dividend_yield: detail.dividend_yield.float(),
            dividend_rate: detail.dividend_rate.float(),
            payout_ratio: detail.payout_ratio.float(),
            ex_dividend_date: detail.ex_dividend_date.int(),
            last_dividend_value: stats.last_dividend_value.float(),
            last_dividend_date: stats.last_dividend_date.int(),
            five_year_avg_dividend_yield: detail.five_year_avg_dividend_yield.float(),
            trailing_annual_dividend_rate: detail.trailing_annual_dividend_rate.float(),
            trailing_annual_dividend_yield: detail.trailing_annual_dividend_yield.float(),

            recommendation_key: financial.recommendation_key.into_inner(),
            recommendation_mean: financial.recommendation_mean.float(),
            number_of_analyst_opinions: financial.number_of_analyst_opinions.count(),
            target_high_price: financial.target_high_price.float(),
            target_low_price: financial.target_low_price.float(),
            target_mean_price: financial.target_mean_price.float(),
            target_median_price: financial.target_median_price.float(),
        }
    }
}

/// Response of the `/v1/finance/search` endpoint; only news is used
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct YahooSearchResponse {
    pub news: Vec<YahooNewsItem>,
}

/// A news entry from search
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YahooNewsItem {
    pub title: YahooText,
    pub publisher: YahooText,
    pub link: YahooText,
    pub provider_publish_time: YahooValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_value_shapes() {
        let v: YahooValue = serde_json::from_str(r#"{"raw": 150.25, "fmt": "150.25"}"#).unwrap();
        assert_eq!(v.float(), Some(150.25));

        let v: YahooValue = serde_json::from_str("42").unwrap();
        assert_eq!(v.int(), Some(42));

        let v: YahooValue = serde_json::from_str("{}").unwrap();
        assert_eq!(v.float(), None);

        let v: YahooValue = serde_json::from_str(r#""Infinity""#).unwrap();
        assert_eq!(v.float(), None);

        let v: YahooValue = serde_json::from_str("null").unwrap();
        assert_eq!(v.float(), None);
    }

    #[test]
    fn test_count_rejects_negative() {
        assert_eq!(YahooValue(Some(-3.0)).count(), None);
        assert_eq!(YahooValue(Some(164_000.0)).count(), Some(164_000));
    }

    #[test]
    fn test_deserialize_text_shapes() {
        let t: YahooText = serde_json::from_str(r#""Technology""#).unwrap();
        assert_eq!(t.into_inner(), Some("Technology".to_string()));

        let t: YahooText = serde_json::from_str(r#""  ""#).unwrap();
        assert_eq!(t.into_inner(), None);

        let t: YahooText = serde_json::from_str("{}").unwrap();
        assert_eq!(t.into_inner(), None);
    }

    #[test]
    fn test_deserialize_quote_summary() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {
                        "shortName": "Apple Inc.",
                        "longName": "Apple Inc.",
                        "currency": "USD",
                        "quoteType": "EQUITY",
                        "regularMarketPrice": {"raw": 190.0, "fmt": "190.00"},
                        "regularMarketPreviousClose": {"raw": 188.0, "fmt": "188.00"},
                        "regularMarketVolume": {"raw": 50000000, "fmt": "50M"}
                    },
                    "summaryDetail": {
                        "previousClose": {"raw": 188.5, "fmt": "188.50"},
                        "bid": {"raw": 189.9, "fmt": "189.90"},
                        "ask": {},
                        "marketCap": {"raw": 2950000000000, "fmt": "2.95T"},
                        "trailingPE": {"raw": 29.4, "fmt": "29.40"},
                        "priceToSalesTrailing12Months": {"raw": 7.6, "fmt": "7.60"},
                        "dividendYield": {"raw": 0.005, "fmt": "0.50%"},
                        "exDividendDate": {"raw": 1715299200, "fmt": "2024-05-10"}
                    },
                    "defaultKeyStatistics": {
                        "pegRatio": {"raw": 2.1, "fmt": "2.10"},
                        "sharesOutstanding": {"raw": 15334100000, "fmt": "15.33B"},
                        "beta": {"raw": 1.25, "fmt": "1.25"}
                    },
                    "financialData": {
                        "currentPrice": {"raw": 190.1, "fmt": "190.10"},
                        "recommendationKey": "buy",
                        "numberOfAnalystOpinions": {"raw": 38, "fmt": "38"},
                        "freeCashflow": {"raw": -1200000000, "fmt": "-1.2B"}
                    },
                    "assetProfile": {
                        "sector": "Technology",
                        "fullTimeEmployees": 161000,
                        "companyOfficers": [
                            {"name": "Mr. Timothy D. Cook", "title": "CEO & Director"}
                        ]
                    }
                }],
                "error": null
            }
        }"#;

        let response: YahooQuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let result = response.quote_summary.result.unwrap().into_iter().next().unwrap();
        let info = result.into_ticker_info();

        assert_eq!(info.short_name.as_deref(), Some("Apple Inc."));
        assert_eq!(info.price(), Some(190.1));
        assert_eq!(info.previous_close, Some(188.5));
        assert_eq!(info.regular_market_volume, Some(50_000_000));
        assert_eq!(info.bid, Some(189.9));
        assert_eq!(info.ask, None);
        assert_eq!(info.market_cap, Some(2_950_000_000_000));
        assert_eq!(info.trailing_pe, Some(29.4));
        assert_eq!(info.price_to_sales, Some(7.6));
        assert_eq!(info.ex_dividend_date, Some(1_715_299_200));
        assert_eq!(info.beta, Some(1.25));
        assert_eq!(info.recommendation_key.as_deref(), Some("buy"));
        assert_eq!(info.number_of_analyst_opinions, Some(38));
        assert_eq!(info.free_cashflow, Some(-1_200_000_000));
        assert_eq!(info.full_time_employees, Some(161_000));
        assert_eq!(info.ceo(), Some("Mr. Timothy D. Cook"));
        assert!(info.has_market_data());
    }

    #[test]
    fn test_deserialize_not_found() {
        let json = r#"{
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZQQQ"}
            }
        }"#;

        let response: YahooQuoteSummaryResponse = serde_json::from_str(json).unwrap();
        assert!(response.quote_summary.result.is_none());
        let error = response.quote_summary.error.unwrap();
        assert!(error.is_not_found());
        assert_eq!(error.message(), "Quote not found for symbol: ZZZQQQ");
    }

    #[test]
    fn test_missing_modules_flatten_to_empty() {
        let info = YahooQuoteSummaryResult::default().into_ticker_info();
        assert_eq!(info, TickerInfo::default());
        assert!(!info.has_market_data());
    }

    #[test]
    fn test_deserialize_search_news() {
        let json = r#"{
            "count": 2,
            "quotes": [],
            "news": [
                {
                    "uuid": "a1",
                    "title": "Apple unveils new chips",
                    "publisher": "Reuters",
                    "link": "https://finance.yahoo.com/news/a1",
                    "providerPublishTime": 1718000000,
                    "type": "STORY"
                },
                {"uuid": "a2", "title": ""}
            ]
        }"#;

        let response: YahooSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.news.len(), 2);
        assert_eq!(response.news[0].publisher.0.as_deref(), Some("Reuters"));
        assert_eq!(response.news[0].provider_publish_time.int(), Some(1_718_000_000));
        assert_eq!(response.news[1].title.0, None);
    }
}
