//! Source endpoints and extraction limits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where each source lives and what window of history to request.
///
/// URL templates use `{ticker}`, `{exchange}`, `{period1}` and `{period2}`
/// placeholders. `Default` reproduces the S&P 500 / Yahoo / MarketBeat setup
/// for calendar year 2023.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub index_url: String,
    /// How many constituents to read from the top of the listing.
    pub top_n: usize,
    pub profile_url: String,
    pub statistics_url: String,
    pub history_url: String,
    pub sentiment_url: String,
    /// First day of the price window (inclusive, midnight UTC).
    pub history_start: NaiveDate,
    /// Upper bound of the price window (midnight UTC).
    pub history_end: NaiveDate,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".into(),
            request_timeout_secs: 30,
            index_url: "https://www.slickcharts.com/sp500".into(),
            top_n: 50,
            profile_url: "https://ca.finance.yahoo.com/quote/{ticker}/profile".into(),
            statistics_url: "https://finance.yahoo.com/quote/{ticker}/key-statistics".into(),
            history_url: "https://ca.finance.yahoo.com/quote/{ticker}/history\
                          ?period1={period1}&period2={period2}&interval=1d\
                          &filter=history&frequency=1d&includeAdjustedClose=true"
                .into(),
            sentiment_url: "https://www.marketbeat.com/stocks/{exchange}/{ticker}/".into(),
            history_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            history_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
        }
    }
}

impl SourceConfig {
    pub fn profile_url_for(&self, ticker: &str) -> String {
        self.profile_url.replace("{ticker}", ticker)
    }

    pub fn statistics_url_for(&self, ticker: &str) -> String {
        self.statistics_url.replace("{ticker}", ticker)
    }

    pub fn history_url_for(&self, ticker: &str) -> String {
        let (period1, period2) = self.history_bounds();
        self.history_url
            .replace("{ticker}", ticker)
            .replace("{period1}", &period1.to_string())
            .replace("{period2}", &period2.to_string())
    }

    pub fn sentiment_url_for(&self, ticker: &str, exchange: &str) -> String {
        self.sentiment_url
            .replace("{exchange}", exchange)
            .replace("{ticker}", ticker)
    }

    /// Unix-epoch seconds for the start and end of the history window.
    pub fn history_bounds(&self) -> (i64, i64) {
        (epoch_seconds(self.history_start), epoch_seconds(self.history_end))
    }
}

fn epoch_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_calendar_2023() {
        let config = SourceConfig::default();
        assert_eq!(config.history_bounds(), (1_672_531_200, 1_703_980_800));
    }

    #[test]
    fn history_url_embeds_epoch_bounds() {
        let url = SourceConfig::default().history_url_for("AAPL");
        assert_eq!(
            url,
            "https://ca.finance.yahoo.com/quote/AAPL/history?period1=1672531200&period2=1703980800\
             &interval=1d&filter=history&frequency=1d&includeAdjustedClose=true"
        );
    }

    #[test]
    fn per_ticker_urls() {
        let config = SourceConfig::default();
        assert_eq!(
            config.profile_url_for("MSFT"),
            "https://ca.finance.yahoo.com/quote/MSFT/profile"
        );
        assert_eq!(
            config.statistics_url_for("MSFT"),
            "https://finance.yahoo.com/quote/MSFT/key-statistics"
        );
        assert_eq!(
            config.sentiment_url_for("MSFT", "NASDAQ"),
            "https://www.marketbeat.com/stocks/NASDAQ/MSFT/"
        );
    }
}
