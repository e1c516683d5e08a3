//! Page fetching and per-site extraction

pub mod config;
pub mod exchange;
pub mod extraction;
pub mod fixture;
pub mod html;
pub mod http;
pub mod index;
pub mod profile;
pub mod provider;
pub mod sentiment;

pub use config::SourceConfig;
pub use exchange::{ExchangeClassifier, FixedClassifier, PageTextClassifier};
pub use extraction::Extraction;
pub use fixture::StaticFetcher;
pub use http::HttpFetcher;
pub use index::IndexMembershipExtractor;
pub use profile::CompanyProfileExtractor;
pub use provider::{FetchedPage, NoProgress, PageFetcher, ScrapeError, ScrapeProgress, StdoutProgress};
pub use sentiment::AnalystSentimentExtractor;
