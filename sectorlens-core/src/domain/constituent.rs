//! Constituent: one member of the scraped index snapshot.

use serde::{Deserialize, Serialize};

/// A (ticker, company name) pair read from the index listing page.
///
/// Constituents are produced once per run, in the listing's rank order, and
/// are identified by ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituent {
    pub ticker: String,
    pub company_name: String,
}

impl Constituent {
    pub fn new(ticker: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: company_name.into(),
        }
    }
}
