//! Response shaping helpers
//!
//! Absent numbers are reported as JSON `null`; absent descriptive text as
//! [`UNAVAILABLE`].

use serde_json::Value;

/// Sentinel for descriptive text the provider did not supply
pub const UNAVAILABLE: &str = "N/A";

/// Currency assumed when the provider does not report one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Treat zero like a missing value, for figures used as divisors
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Percent move from `from` to `to`, rounded to two decimals
///
/// `None` unless both values are present and non-zero.
pub fn percent_change(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    let (from, to) = (nonzero(from)?, nonzero(to)?);
    Some(round2((to - from) / from * 100.0))
}

/// Absolute and percent change of `current` against `previous`
///
/// The percent figure is computed from the rounded absolute change.
pub fn price_change(current: Option<f64>, previous: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (nonzero(current), nonzero(previous)) {
        (Some(current), Some(previous)) => {
            let change = round2(current - previous);
            (Some(change), Some(round2(change / previous * 100.0)))
        }
        _ => (None, None),
    }
}

/// Text value or the "N/A" sentinel
pub fn text_or_unavailable(value: Option<&str>) -> Value {
    Value::String(value.unwrap_or(UNAVAILABLE).to_string())
}
