//! Record assembly: joins each constituent with its profile and sentiment.
//!
//! Produces three views over the same data:
//! - `CombinedRecord`: one row per constituent, in index order
//! - `BuyRatingRecord`: the subset whose analyst rating mentions "Buy"
//! - `IndustryGroup`: records partitioned by industry, used only for charts

use sectorlens_core::domain::{Constituent, PricePoint, Profile, SentimentMap, NOT_AVAILABLE};
use sectorlens_core::source::sentiment::{ANALYST_RATING, NEWS_SENTIMENT, UPSIDE_DOWNSIDE};
use serde::Serialize;
use tracing::warn;

/// Substring that marks a bullish analyst rating ("Buy", "Strong Buy", ...).
pub const BUY_MARKER: &str = "Buy";

/// Everything scraped for one constituent, before joining.
#[derive(Debug, Clone)]
pub struct TickerData {
    pub constituent: Constituent,
    pub profile: Profile,
    pub sentiment: SentimentMap,
}

/// Fully joined per-ticker row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRecord {
    pub ticker: String,
    pub company_name: String,
    pub industry: String,
    pub forward_pe: Option<f64>,
    pub pe_difference: Option<f64>,
    pub exchange: String,
    /// Not exported to the workbook; drives the industry charts.
    pub prices: Vec<PricePoint>,
    pub analyst_rating: String,
    pub upside_downside: String,
    pub news_sentiment: String,
}

impl CombinedRecord {
    pub fn has_buy_rating(&self) -> bool {
        self.analyst_rating.contains(BUY_MARKER)
    }

    pub fn has_prices(&self) -> bool {
        !self.prices.is_empty()
    }
}

/// The buy-rating view of a combined record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuyRatingRecord {
    pub company_name: String,
    pub analyst_rating: String,
    pub upside_downside: String,
    pub news_sentiment: String,
    pub pe_difference: Option<f64>,
}

impl From<&CombinedRecord> for BuyRatingRecord {
    fn from(r: &CombinedRecord) -> Self {
        Self {
            company_name: r.company_name.clone(),
            analyst_rating: r.analyst_rating.clone(),
            upside_downside: r.upside_downside.clone(),
            news_sentiment: r.news_sentiment.clone(),
            pe_difference: r.pe_difference,
        }
    }
}

/// Records sharing one industry string, in index order.
#[derive(Debug, Clone)]
pub struct IndustryGroup<'a> {
    pub industry: String,
    pub records: Vec<&'a CombinedRecord>,
}

impl IndustryGroup<'_> {
    /// Whether this group gets a chart: a known industry with members.
    pub fn is_chartable(&self) -> bool {
        self.industry != NOT_AVAILABLE && !self.records.is_empty()
    }
}

/// Output of `assemble`: the records plus the diagnostics raised on the way.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub records: Vec<CombinedRecord>,
    pub warnings: Vec<String>,
}

/// Join one ticker's data into a record.
///
/// Returns a warning when the record lacks an upside/downside value.
pub fn assemble_record(data: &TickerData) -> (CombinedRecord, Option<String>) {
    let lookup = |label: &str| {
        data.sentiment
            .main_value(label)
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    };

    let record = CombinedRecord {
        ticker: data.constituent.ticker.clone(),
        company_name: data.constituent.company_name.clone(),
        industry: data.profile.industry.clone(),
        forward_pe: data.profile.forward_pe,
        pe_difference: data.profile.pe_difference,
        exchange: data.profile.exchange_label().to_string(),
        prices: data.profile.prices.clone(),
        analyst_rating: lookup(ANALYST_RATING),
        upside_downside: lookup(UPSIDE_DOWNSIDE),
        news_sentiment: lookup(NEWS_SENTIMENT),
    };

    let warning = (record.upside_downside == NOT_AVAILABLE)
        .then(|| format!("'{UPSIDE_DOWNSIDE}' is '{NOT_AVAILABLE}' for ticker {}", record.ticker));

    (record, warning)
}

/// Join every ticker, preserving input order. Never fails.
pub fn assemble(data: &[TickerData]) -> Assembly {
    let mut assembly = Assembly {
        records: Vec::with_capacity(data.len()),
        warnings: Vec::new(),
    };

    for ticker in data {
        let (record, warning) = assemble_record(ticker);
        if let Some(w) = warning {
            warn!("{w}");
            assembly.warnings.push(w);
        }
        assembly.records.push(record);
    }

    assembly
}

/// Records whose analyst rating contains "Buy" (case-sensitive substring).
pub fn buy_ratings(records: &[CombinedRecord]) -> Vec<BuyRatingRecord> {
    records
        .iter()
        .filter(|r| r.has_buy_rating())
        .map(BuyRatingRecord::from)
        .collect()
}

/// Partition records by exact industry string.
///
/// Groups appear in the order their industry first appears; members keep
/// their relative order. The `"N/A"` group is included; use
/// `IndustryGroup::is_chartable` to leave it out.
pub fn group_by_industry(records: &[CombinedRecord]) -> Vec<IndustryGroup<'_>> {
    let mut groups: Vec<IndustryGroup<'_>> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.industry == record.industry) {
            Some(group) => group.records.push(record),
            None => groups.push(IndustryGroup {
                industry: record.industry.clone(),
                records: vec![record],
            }),
        }
    }
    groups
}
