//! Profile: per-company descriptive data, valuation ratios, and price history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::NOT_AVAILABLE;

/// One closing price on one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Listing exchange, as used in the sentiment source's URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Exchange {
    Nasdaq,
    Nyse,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Nasdaq => "NASDAQ",
            Exchange::Nyse => "NYSE",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the profile source yields for a single ticker.
///
/// Fields that could not be extracted stay `"N/A"` (text) or `None`
/// (numbers). The price series is kept in the order the source publishes
/// it, which is newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub country: String,
    pub industry: String,
    /// `None` only when the profile page itself could not be fetched.
    pub exchange: Option<Exchange>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub pe_difference: Option<f64>,
    pub prices: Vec<PricePoint>,
}

impl Profile {
    /// A profile with every field missing.
    pub fn unavailable() -> Self {
        Self {
            country: NOT_AVAILABLE.to_string(),
            industry: NOT_AVAILABLE.to_string(),
            exchange: None,
            trailing_pe: None,
            forward_pe: None,
            pe_difference: None,
            prices: Vec::new(),
        }
    }

    /// Set both P/E ratios and derive their difference.
    ///
    /// The difference is `forward - trailing` and exists only when both
    /// ratios do.
    pub fn set_pe_ratios(&mut self, trailing: Option<f64>, forward: Option<f64>) {
        self.trailing_pe = trailing;
        self.forward_pe = forward;
        self.pe_difference = pe_difference(trailing, forward);
    }

    /// Exchange label for display and export, `"N/A"` when unknown.
    pub fn exchange_label(&self) -> &str {
        self.exchange.map_or(NOT_AVAILABLE, |e| e.as_str())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// `forward - trailing`, present only when both inputs are.
pub fn pe_difference(trailing: Option<f64>, forward: Option<f64>) -> Option<f64> {
    match (trailing, forward) {
        (Some(t), Some(f)) => Some(f - t),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_needs_both_ratios() {
        assert_eq!(pe_difference(Some(12.0), None), None);
        assert_eq!(pe_difference(None, Some(15.2)), None);
        assert_eq!(pe_difference(None, None), None);
    }

    #[test]
    fn difference_is_forward_minus_trailing() {
        let diff = pe_difference(Some(12.0), Some(15.2)).unwrap();
        assert!((diff - 3.2).abs() < 1e-9, "got {diff}");
    }

    #[test]
    fn set_pe_ratios_keeps_fields_consistent() {
        let mut profile = Profile::unavailable();
        profile.set_pe_ratios(Some(30.0), Some(25.0));
        assert_eq!(profile.trailing_pe, Some(30.0));
        assert_eq!(profile.forward_pe, Some(25.0));
        assert_eq!(profile.pe_difference, Some(-5.0));

        profile.set_pe_ratios(None, Some(25.0));
        assert_eq!(profile.pe_difference, None);
    }

    #[test]
    fn unavailable_profile_reports_na() {
        let profile = Profile::unavailable();
        assert_eq!(profile.country, "N/A");
        assert_eq!(profile.industry, "N/A");
        assert_eq!(profile.exchange_label(), "N/A");
        assert!(profile.prices.is_empty());
    }

    #[test]
    fn exchange_labels_match_url_scheme() {
        assert_eq!(Exchange::Nasdaq.to_string(), "NASDAQ");
        assert_eq!(Exchange::Nyse.to_string(), "NYSE");
    }
}
