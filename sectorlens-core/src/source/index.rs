//! Index membership extractor.
//!
//! Reads the top constituents of an index from its public listing table.
//! Rank order on the page is preserved: later grouping and chart order
//! derive from it.

use super::config::SourceConfig;
use super::extraction::Extraction;
use super::html::{trimmed_text, ClassSignature, TD, TR};
use super::provider::{PageFetcher, ScrapeError};
use crate::domain::Constituent;
use scraper::Html;
use tracing::{info, warn};

/// The listing table's class set.
pub const INDEX_TABLE: ClassSignature = ClassSignature::new(
    "table",
    &["table", "table-hover", "table-borderless", "table-sm"],
);

const NAME_CELL: usize = 1;
const TICKER_CELL: usize = 2;

pub struct IndexMembershipExtractor<'a> {
    fetcher: &'a dyn PageFetcher,
    config: &'a SourceConfig,
}

impl<'a> IndexMembershipExtractor<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, config: &'a SourceConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch the listing page and read up to `top_n` constituents.
    ///
    /// `Failed` when the page is unreachable, answers a non-success status,
    /// or lacks the listing table.
    pub fn extract(&self) -> Extraction<Vec<Constituent>> {
        info!(url = %self.config.index_url, "fetching index listing");
        let page = match self.fetcher.fetch_success(&self.config.index_url) {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "index listing unavailable");
                return Extraction::Failed(e);
            }
        };
        parse_index_page(&page.body, &page.url, self.config.top_n)
    }
}

/// Parse constituents out of a listing page body.
///
/// Row 1 is the header; rows 2..=top_n+1 hold, in their 2nd and 3rd data
/// cells, the company name and the ticker.
pub fn parse_index_page(html: &str, url: &str, top_n: usize) -> Extraction<Vec<Constituent>> {
    let doc = Html::parse_document(html);
    let Some(table) = INDEX_TABLE.select_all(&doc).next() else {
        warn!(url, "index table not found");
        return Extraction::Failed(ScrapeError::StructureMismatch {
            what: INDEX_TABLE.describe(),
            url: url.to_string(),
        });
    };

    let mut constituents = Vec::with_capacity(top_n);
    let mut issues = Vec::new();

    for (i, row) in table.select(&TR).skip(1).take(top_n).enumerate() {
        let cells: Vec<_> = row.select(&TD).collect();
        if cells.len() <= TICKER_CELL {
            let row_number = i + 2;
            warn!(row = row_number, cells = cells.len(), "index row too short, skipped");
            issues.push(ScrapeError::StructureMismatch {
                what: format!("name and ticker cells in table row {row_number}"),
                url: url.to_string(),
            });
            continue;
        }
        constituents.push(Constituent::new(
            trimmed_text(&cells[TICKER_CELL]),
            trimmed_text(&cells[NAME_CELL]),
        ));
    }

    info!(count = constituents.len(), "index constituents read");
    Extraction::from_parts(constituents, issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(rows: usize) -> String {
        let mut html = String::from(
            r#"<html><body><table class="table table-hover table-borderless table-sm">
               <tr><th>#</th><th>Company</th><th>Symbol</th><th>Weight</th></tr>"#,
        );
        for i in 0..rows {
            html.push_str(&format!(
                "<tr><td>{n}</td><td> Company {n} </td><td> T{n} </td><td>1.0</td></tr>",
                n = i + 1
            ));
        }
        html.push_str("</table></body></html>");
        html
    }

    #[test]
    fn reads_top_fifty_in_order() {
        let result = parse_index_page(&listing(60), "u", 50);
        assert!(result.is_complete());
        let constituents = result.into_result().unwrap();
        assert_eq!(constituents.len(), 50);
        assert_eq!(constituents[0], Constituent::new("T1", "Company 1"));
        assert_eq!(constituents[49], Constituent::new("T50", "Company 50"));
    }

    #[test]
    fn short_listing_returns_what_exists() {
        let constituents = parse_index_page(&listing(3), "u", 50).into_result().unwrap();
        assert_eq!(constituents.len(), 3);
    }

    #[test]
    fn missing_table_is_structure_mismatch() {
        let result = parse_index_page("<html><table class=\"table\"></table></html>", "u", 50);
        assert!(matches!(
            result,
            Extraction::Failed(ScrapeError::StructureMismatch { .. })
        ));
    }

    #[test]
    fn short_row_is_skipped_and_reported() {
        let html = r#"<table class="table table-hover table-borderless table-sm">
            <tr><th>#</th></tr>
            <tr><td>1</td><td>Only Name</td></tr>
            <tr><td>2</td><td>Apple Inc.</td><td>AAPL</td></tr></table>"#;
        let result = parse_index_page(html, "u", 50);
        assert_eq!(result.issues().len(), 1);
        let constituents = result.into_result().unwrap();
        assert_eq!(constituents, vec![Constituent::new("AAPL", "Apple Inc.")]);
    }
}
