//! Exchange classification.
//!
//! The profile page does not expose the listing exchange in a stable element,
//! so the default classifier searches the page text for the literal `NASDAQ`
//! and falls back to NYSE. This misclassifies any NYSE company whose page
//! mentions NASDAQ; a real lookup can be swapped in through the trait without
//! touching the extractors.

use crate::domain::Exchange;

/// Decides which exchange a ticker is listed on.
pub trait ExchangeClassifier {
    fn classify(&self, ticker: &str, page_text: &str) -> Exchange;
}

/// Substring heuristic over the full profile page text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTextClassifier;

impl ExchangeClassifier for PageTextClassifier {
    fn classify(&self, _ticker: &str, page_text: &str) -> Exchange {
        if page_text.contains("NASDAQ") {
            Exchange::Nasdaq
        } else {
            Exchange::Nyse
        }
    }
}

/// Always answers the same exchange.
#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier(pub Exchange);

impl ExchangeClassifier for FixedClassifier {
    fn classify(&self, _ticker: &str, _page_text: &str) -> Exchange {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nasdaq_anywhere_in_text() {
        let c = PageTextClassifier;
        assert_eq!(c.classify("AAPL", "Apple Inc. (AAPL) NasdaqGS - NASDAQ Real Time"), Exchange::Nasdaq);
    }

    #[test]
    fn everything_else_is_nyse() {
        let c = PageTextClassifier;
        assert_eq!(c.classify("JPM", "JPMorgan Chase & Co. (JPM) NYSE"), Exchange::Nyse);
        assert_eq!(c.classify("XYZ", ""), Exchange::Nyse);
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(PageTextClassifier.classify("AAPL", "NasdaqGS"), Exchange::Nyse);
    }

    #[test]
    fn fixed_classifier_ignores_text() {
        assert_eq!(FixedClassifier(Exchange::Nasdaq).classify("JPM", "NYSE"), Exchange::Nasdaq);
    }
}
