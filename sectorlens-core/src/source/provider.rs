//! Page fetcher trait and structured error types.
//!
//! The PageFetcher trait abstracts over the HTTP transport so extractors can
//! be driven by the live sites or by in-memory fixtures in tests.

use thiserror::Error;

/// Structured error types for scraping operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrapeError {
    #[error("fetch failed: HTTP {status} for {url}")]
    FetchFailure { url: String, status: u16 },

    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("structure mismatch: {what} not found at {url}")]
    StructureMismatch { what: String, url: String },

    #[error("format error: cannot parse {field} from {value:?}")]
    FormatError { field: String, value: String },
}

impl ScrapeError {
    /// True for errors raised before any markup was available.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ScrapeError::FetchFailure { .. } | ScrapeError::Transport { .. }
        )
    }
}

/// A fetched document: HTTP status plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success status into a `FetchFailure`.
    pub fn into_success(self) -> Result<Self, ScrapeError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ScrapeError::FetchFailure {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// Trait for page sources (live HTTP, in-memory fixtures).
///
/// `fetch` returns `Err` only for transport-level failures; HTTP error
/// statuses come back as a `FetchedPage` so callers decide what they mean.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError>;

    /// Fetch and require a 2xx status.
    fn fetch_success(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        self.fetch(url)?.into_success()
    }
}

/// Progress callback for the per-ticker scrape loop.
pub trait ScrapeProgress {
    /// Called when starting to scrape a ticker.
    fn on_start(&self, ticker: &str, index: usize, total: usize);

    /// Called when a ticker is done; `issues` counts degraded fields.
    fn on_complete(&self, ticker: &str, index: usize, total: usize, issues: usize);

    /// Called when every ticker has been visited.
    fn on_batch_complete(&self, complete: usize, degraded: usize, total: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl ScrapeProgress for StdoutProgress {
    fn on_start(&self, ticker: &str, index: usize, total: usize) {
        println!("[{}/{}] Scraping {ticker}...", index + 1, total);
    }

    fn on_complete(&self, ticker: &str, _index: usize, _total: usize, issues: usize) {
        if issues == 0 {
            println!("  OK: {ticker}");
        } else {
            println!("  PARTIAL: {ticker} ({issues} field group(s) unavailable)");
        }
    }

    fn on_batch_complete(&self, complete: usize, degraded: usize, total: usize) {
        println!("\nScrape complete: {complete}/{total} complete, {degraded} partial");
    }
}

/// Progress reporter that discards every event.
pub struct NoProgress;

impl ScrapeProgress for NoProgress {
    fn on_start(&self, _ticker: &str, _index: usize, _total: usize) {}
    fn on_complete(&self, _ticker: &str, _index: usize, _total: usize, _issues: usize) {}
    fn on_batch_complete(&self, _complete: usize, _degraded: usize, _total: usize) {}
}
