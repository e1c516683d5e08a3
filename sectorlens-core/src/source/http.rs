//! Live HTTP page fetcher.
//!
//! Blocking, one request at a time. No retry, backoff, or rate limiting: a
//! failed request is reported once and the caller moves on.

use super::provider::{FetchedPage, PageFetcher, ScrapeError};
use std::time::Duration;

/// Fetches pages over HTTP(S) with a fixed User-Agent.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ScrapeError::Transport {
                url: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| ScrapeError::Transport {
            url: url.to_string(),
            reason: format!("failed to read body: {e}"),
        })?;

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}
