//! Analyst sentiment extractor.
//!
//! The analytics page lays its headline metrics out as a row of stat blocks,
//! each holding a label, a main statistic, and a line of supporting detail.
//! Blocks that lack a label or a statistic are skipped; the rest are kept.

use super::config::SourceConfig;
use super::extraction::Extraction;
use super::html::{trimmed_text, ClassSignature};
use super::provider::{PageFetcher, ScrapeError};
use crate::domain::{Exchange, SentimentMap, SentimentMetric};
use scraper::Html;
use tracing::{debug, warn};

pub const STAT_BLOCK: ClassSignature = ClassSignature::new(
    "div",
    &["col-md-3", "col-sm-4", "col-6", "mb-2", "marketrankRowOne"],
);
pub const STAT_LABEL: ClassSignature = ClassSignature::new(
    "dt",
    &["font-small", "text-uppercase", "font-weight-normal", "mb-2"],
);
pub const STAT_MAIN: ClassSignature = ClassSignature::new("div", &["key-stat"]);
pub const STAT_DETAIL: ClassSignature = ClassSignature::new("div", &["key-stat-details"]);

pub const ANALYST_RATING: &str = "Analyst Rating";
pub const UPSIDE_DOWNSIDE: &str = "Upside/Downside";
pub const NEWS_SENTIMENT: &str = "News Sentiment";

pub struct AnalystSentimentExtractor<'a> {
    fetcher: &'a dyn PageFetcher,
    config: &'a SourceConfig,
}

impl<'a> AnalystSentimentExtractor<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, config: &'a SourceConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch and parse the sentiment page for `ticker` on `exchange`.
    ///
    /// `Failed` only when the page cannot be fetched.
    pub fn extract(&self, ticker: &str, exchange: Exchange) -> Extraction<SentimentMap> {
        let url = self.config.sentiment_url_for(ticker, exchange.as_str());
        match self.fetcher.fetch_success(&url) {
            Ok(page) => parse_sentiment_page(&page.body, &page.url, ticker),
            Err(e) => {
                warn!(ticker, error = %e, "sentiment page unavailable");
                Extraction::Failed(e)
            }
        }
    }
}

/// Parse every stat block on a sentiment page.
///
/// Later blocks overwrite earlier ones with the same label. A missing
/// `Upside/Downside` metric is logged but is not an issue.
pub fn parse_sentiment_page(html: &str, url: &str, ticker: &str) -> Extraction<SentimentMap> {
    let doc = Html::parse_document(html);
    let mut metrics = SentimentMap::new();
    let mut issues = Vec::new();

    for (i, block) in STAT_BLOCK.select_all(&doc).enumerate() {
        let label = STAT_LABEL.first_in(block).map(|e| trimmed_text(&e));
        let main_value = STAT_MAIN.first_in(block).map(|e| trimmed_text(&e));
        let detail = STAT_DETAIL
            .first_in(block)
            .map(|e| trimmed_text(&e))
            .unwrap_or_default();

        let (Some(label), Some(main_value)) = (label, main_value) else {
            debug!(ticker, block = i, "stat block without label or statistic, skipped");
            issues.push(ScrapeError::StructureMismatch {
                what: format!("label and statistic in stat block {i}"),
                url: url.to_string(),
            });
            continue;
        };
        if label.is_empty() || main_value.is_empty() {
            debug!(ticker, block = i, "empty stat block, skipped");
            continue;
        }

        debug!(ticker, label = %label, main = %main_value, detail = %detail, "stat block");
        if let Some(previous) = metrics.insert(SentimentMetric {
            label,
            main_value,
            detail,
        }) {
            debug!(ticker, label = %previous.label, "duplicate label overwritten");
        }
    }

    if !metrics.contains(UPSIDE_DOWNSIDE) {
        warn!(ticker, "'{UPSIDE_DOWNSIDE}' data is missing");
    }

    Extraction::from_parts(metrics, issues)
}
