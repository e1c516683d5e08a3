//! In-memory page source for offline runs and tests.

use super::provider::{FetchedPage, PageFetcher, ScrapeError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves pages from a fixed URL map. Unknown URLs answer 404.
///
/// Every requested URL is recorded, in order, so callers can check which
/// pages a run touched.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, (u16, String)>,
    unreachable: Vec<String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `url`.
    pub fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), (200, body.into()));
        self
    }

    pub fn status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.pages.insert(url.into(), (status, String::new()));
        self
    }

    /// Fail `url` at the transport level.
    pub fn unreachable(mut self, url: impl Into<String>) -> Self {
        self.unreachable.push(url.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }
        if self.unreachable.iter().any(|u| u == url) {
            return Err(ScrapeError::Transport {
                url: url.to_string(),
                reason: "connection refused".into(),
            });
        }
        let (status, body) = self
            .pages
            .get(url)
            .cloned()
            .unwrap_or((404, String::new()));
        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_known_pages_and_404s_the_rest() {
        let fetcher = StaticFetcher::new()
            .page("mem://a", "<p>a</p>")
            .status("mem://b", 503)
            .unreachable("mem://c");

        assert_eq!(fetcher.fetch_success("mem://a").unwrap().body, "<p>a</p>");
        assert_eq!(
            fetcher.fetch_success("mem://b"),
            Err(ScrapeError::FetchFailure {
                url: "mem://b".into(),
                status: 503
            })
        );
        assert!(fetcher.fetch("mem://c").unwrap_err().is_fetch_failure());
        assert_eq!(fetcher.fetch("mem://d").unwrap().status, 404);
        assert_eq!(fetcher.requests(), ["mem://a", "mem://b", "mem://c", "mem://d"]);
    }
}
