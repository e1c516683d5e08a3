//! Company profile extractor.
//!
//! Three independent sub-fetches per ticker:
//! - profile page: country, industry, and the exchange heuristic
//! - statistics page: trailing and forward P/E
//! - history page: daily closing prices for the configured window
//!
//! A failing sub-fetch leaves only its own fields unavailable.

use super::config::SourceConfig;
use super::exchange::ExchangeClassifier;
use super::extraction::Extraction;
use super::html::{
    labeled_sibling_text, page_text, parse_number, parse_optional_number,
    trimmed_text, ClassSignature, TD,
};
use super::provider::{PageFetcher, ScrapeError};
use crate::domain::{Exchange, PricePoint, Profile, NOT_AVAILABLE};
use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

/// Row style of a daily price row on the history page.
pub const HISTORY_ROW: ClassSignature = ClassSignature::new(
    "tr",
    &["BdT", "Bdc($seperatorColor)", "Ta(end)", "Fz(s)", "Whs(nw)"],
);

/// Cell index of the date in a history row.
const DATE_CELL: usize = 0;
/// Cell index of the "Close" column in a history row.
const CLOSE_CELL: usize = 4;

const TRAILING_PE_LABEL: &str = "Trailing P/E";
const FORWARD_PE_LABEL: &str = "Forward P/E";

/// Date layouts accepted in the history table's first column.
const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%d %b %Y"];

/// Fields read from the profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub country: String,
    pub industry: String,
    pub exchange: Exchange,
}

/// P/E ratios read from the statistics page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Valuation {
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
}

pub struct CompanyProfileExtractor<'a> {
    fetcher: &'a dyn PageFetcher,
    config: &'a SourceConfig,
    classifier: &'a dyn ExchangeClassifier,
}

impl<'a> CompanyProfileExtractor<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        config: &'a SourceConfig,
        classifier: &'a dyn ExchangeClassifier,
    ) -> Self {
        Self {
            fetcher,
            config,
            classifier,
        }
    }

    /// Run all three sub-fetches for `ticker`.
    ///
    /// Never `Failed`: a ticker whose pages are all unavailable still yields
    /// a profile of `"N/A"`/absent fields, reported as `Partial`.
    pub fn extract(&self, ticker: &str) -> Extraction<Profile> {
        let mut profile = Profile::unavailable();
        let mut issues = Vec::new();

        match self.fetch_profile(ticker) {
            Ok((fields, mut missing)) => {
                profile.country = fields.country;
                profile.industry = fields.industry;
                profile.exchange = Some(fields.exchange);
                issues.append(&mut missing);
            }
            Err(e) => {
                warn!(ticker, error = %e, "profile data unavailable");
                issues.push(e);
            }
        }

        match self.fetch_valuation(ticker) {
            Ok((valuation, mut missing)) => {
                profile.set_pe_ratios(valuation.trailing_pe, valuation.forward_pe);
                issues.append(&mut missing);
            }
            Err(e) => {
                warn!(ticker, error = %e, "statistics data unavailable");
                issues.push(e);
            }
        }

        match self.fetch_history(ticker) {
            Ok(prices) => profile.prices = prices,
            Err(e) => {
                warn!(ticker, error = %e, "price history unavailable");
                issues.push(e);
            }
        }

        Extraction::from_parts(profile, issues)
    }

    fn fetch_profile(&self, ticker: &str) -> Result<(ProfileFields, Vec<ScrapeError>), ScrapeError> {
        let page = self.fetcher.fetch_success(&self.config.profile_url_for(ticker))?;
        debug!(ticker, "profile page retrieved");
        Ok(parse_profile_page(&page.body, &page.url, ticker, self.classifier))
    }

    fn fetch_valuation(&self, ticker: &str) -> Result<(Valuation, Vec<ScrapeError>), ScrapeError> {
        let page = self.fetcher.fetch_success(&self.config.statistics_url_for(ticker))?;
        debug!(ticker, "statistics page retrieved");
        Ok(parse_statistics_page(&page.body, &page.url))
    }

    fn fetch_history(&self, ticker: &str) -> Result<Vec<PricePoint>, ScrapeError> {
        let page = self.fetcher.fetch_success(&self.config.history_url_for(ticker))?;
        debug!(ticker, "history page retrieved");
        parse_history_page(&page.body)
    }
}

/// Read country, industry, and exchange from a profile page.
///
/// Missing labels come back as `"N/A"` together with a `StructureMismatch`
/// issue each.
pub fn parse_profile_page(
    html: &str,
    url: &str,
    ticker: &str,
    classifier: &dyn ExchangeClassifier,
) -> (ProfileFields, Vec<ScrapeError>) {
    let doc = Html::parse_document(html);
    let mut issues = Vec::new();

    let mut labeled = |label: &str| {
        labeled_sibling_text(&doc, "span", label).unwrap_or_else(|| {
            issues.push(ScrapeError::StructureMismatch {
                what: format!("`{label}` field"),
                url: url.to_string(),
            });
            NOT_AVAILABLE.to_string()
        })
    };
    let country = labeled("Country");
    let industry = labeled("Industry");
    let exchange = classifier.classify(ticker, &page_text(&doc));

    (
        ProfileFields {
            country,
            industry,
            exchange,
        },
        issues,
    )
}

/// Read trailing and forward P/E from a statistics page.
///
/// A `--` placeholder is an absent value. A missing cell or an unparsable
/// value is also absent, and reported as an issue.
pub fn parse_statistics_page(html: &str, url: &str) -> (Valuation, Vec<ScrapeError>) {
    let doc = Html::parse_document(html);
    let mut issues = Vec::new();

    let mut ratio = |label: &str| -> Option<f64> {
        let Some(raw) = labeled_sibling_text(&doc, "td", label) else {
            issues.push(ScrapeError::StructureMismatch {
                what: format!("`{label}` cell"),
                url: url.to_string(),
            });
            return None;
        };
        match parse_optional_number(label, &raw) {
            Ok(value) => value,
            Err(e) => {
                issues.push(e);
                None
            }
        }
    };
    let trailing_pe = ratio(TRAILING_PE_LABEL);
    let forward_pe = ratio(FORWARD_PE_LABEL);

    (
        Valuation {
            trailing_pe,
            forward_pe,
        },
        issues,
    )
}

/// Read (date, close) pairs from a history page, in page order.
///
/// Rows with four cells or fewer (dividend and split annotations) are
/// skipped. Any unparsable date or close aborts the whole parse.
pub fn parse_history_page(html: &str) -> Result<Vec<PricePoint>, ScrapeError> {
    let doc = Html::parse_document(html);
    let mut prices = Vec::new();

    for row in HISTORY_ROW.select_all(&doc) {
        let cells: Vec<ElementRef<'_>> = row.select(&TD).collect();
        if cells.len() <= CLOSE_CELL {
            continue;
        }
        let date = parse_date(&trimmed_text(&cells[DATE_CELL]))?;
        let close = parse_number("close", &trimmed_text(&cells[CLOSE_CELL]))?;
        prices.push(PricePoint { date, close });
    }

    Ok(prices)
}

fn parse_date(raw: &str) -> Result<NaiveDate, ScrapeError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| ScrapeError::FormatError {
            field: "date".into(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::exchange::PageTextClassifier;

    fn history_row(date: &str, close: &str) -> String {
        format!(
            r#"<tr class="BdT Bdc($seperatorColor) Ta(end) Fz(s) Whs(nw)">
               <td>{date}</td><td>1</td><td>2</td><td>0.5</td><td>{close}</td><td>{close}</td><td>1,000</td></tr>"#
        )
    }

    fn annotation_row(date: &str) -> String {
        format!(
            r#"<tr class="BdT Bdc($seperatorColor) Ta(end) Fz(s) Whs(nw)">
               <td>{date}</td><td colspan="6">0.24 Dividend</td></tr>"#
        )
    }

    #[test]
    fn profile_fields_and_nasdaq_heuristic() {
        let html = r#"<html><body><h1>Apple Inc. (AAPL)</h1><p>NasdaqGS - NASDAQ Real Time Price</p>
            <div><span>Country</span><span>United States</span></div>
            <div><span>Sector</span><span>Technology</span><span>Industry</span><span>Consumer Electronics</span></div>
            </body></html>"#;
        let (fields, issues) = parse_profile_page(html, "u", "AAPL", &PageTextClassifier);
        assert!(issues.is_empty());
        assert_eq!(fields.country, "United States");
        assert_eq!(fields.industry, "Consumer Electronics");
        assert_eq!(fields.exchange, Exchange::Nasdaq);
    }

    #[test]
    fn missing_profile_labels_are_na() {
        let html = "<html><body><p>NYSE - Delayed Quote</p></body></html>";
        let (fields, issues) = parse_profile_page(html, "u", "JPM", &PageTextClassifier);
        assert_eq!(fields.country, "N/A");
        assert_eq!(fields.industry, "N/A");
        assert_eq!(fields.exchange, Exchange::Nyse);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn statistics_parse_ratios() {
        let html = r#"<table>
            <tr><td>Trailing P/E</td><td>12.0</td></tr>
            <tr><td>Forward P/E</td><td>15.2</td></tr></table>"#;
        let (valuation, issues) = parse_statistics_page(html, "u");
        assert!(issues.is_empty());
        assert_eq!(valuation.trailing_pe, Some(12.0));
        assert_eq!(valuation.forward_pe, Some(15.2));
    }

    #[test]
    fn statistics_placeholder_is_absent_without_issue() {
        let html = r#"<table>
            <tr><td>Trailing P/E</td><td>--</td></tr>
            <tr><td>Forward P/E</td><td>1,015.20</td></tr></table>"#;
        let (valuation, issues) = parse_statistics_page(html, "u");
        assert!(issues.is_empty());
        assert_eq!(valuation.trailing_pe, None);
        assert_eq!(valuation.forward_pe, Some(1015.2));
    }

    #[test]
    fn statistics_garbage_is_absent_with_issue() {
        let html = r#"<table>
            <tr><td>Trailing P/E</td><td>∞</td></tr></table>"#;
        let (valuation, issues) = parse_statistics_page(html, "u");
        assert_eq!(valuation, Valuation::default());
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], ScrapeError::FormatError { .. }));
        assert!(matches!(issues[1], ScrapeError::StructureMismatch { .. }));
    }

    #[test]
    fn history_skips_annotation_rows() {
        let mut html = String::from("<table>");
        html.push_str(&history_row("Dec 29, 2023", "192.53"));
        html.push_str(&history_row("Dec 28, 2023", "193.58"));
        html.push_str(&annotation_row("Nov 10, 2023"));
        html.push_str(&history_row("Dec 27, 2023", "193.15"));
        html.push_str(&history_row("Dec 26, 2023", "1,193.05"));
        html.push_str(&history_row("Dec 22, 2023", "193.60"));
        html.push_str("</table>");

        let prices = parse_history_page(&html).unwrap();
        assert_eq!(prices.len(), 5);
        assert_eq!(prices[0].date, NaiveDate::from_ymd_opt(2023, 12, 29).unwrap());
        assert_eq!(prices[0].close, 192.53);
        assert_eq!(prices[3].close, 1193.05);
        assert_eq!(prices[4].date, NaiveDate::from_ymd_opt(2023, 12, 22).unwrap());
    }

    #[test]
    fn history_ignores_rows_without_the_row_style() {
        let html = format!(
            "<table><tr><td>Date</td><td>Open</td><td>High</td><td>Low</td><td>Close</td></tr>{}</table>",
            history_row("Jan 3, 2023", "125.07")
        );
        let prices = parse_history_page(&html).unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
    }

    #[test]
    fn unparsable_close_fails_whole_history() {
        let mut html = String::from("<table>");
        html.push_str(&history_row("Dec 29, 2023", "192.53"));
        html.push_str(&history_row("Dec 28, 2023", "-"));
        html.push_str("</table>");
        let err = parse_history_page(&html).unwrap_err();
        assert!(matches!(err, ScrapeError::FormatError { ref field, .. } if field == "close"));
    }
}
