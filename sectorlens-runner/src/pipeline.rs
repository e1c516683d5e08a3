//! Pipeline orchestration.
//!
//! One run, strictly sequential:
//! 1. Index membership (a failure or an empty listing aborts before
//!    anything is written)
//! 2. Per ticker: profile, then sentiment on the classified exchange
//! 3. Assembly, workbook exports, and one chart per industry

use anyhow::Context;
use sectorlens_core::domain::{Profile, SentimentMap};
use sectorlens_core::source::{
    AnalystSentimentExtractor, CompanyProfileExtractor, ExchangeClassifier, Extraction,
    IndexMembershipExtractor, PageFetcher, ScrapeError, ScrapeProgress,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::assemble::{assemble, buy_ratings, group_by_industry, TickerData};
use crate::config::PipelineConfig;
use crate::reporting::{ChartRenderer, OutputManager, OutputPaths};
use crate::table::{buy_ratings_frame, combined_frame};

/// Closing line printed after a successful run.
pub const COMPLETION_MESSAGE: &str = "All tasks completed successfully.";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to retrieve the index membership page: {0}")]
    IndexUnavailable(ScrapeError),

    #[error("index page listed no constituents")]
    NoConstituents,

    #[error(transparent)]
    Export(#[from] anyhow::Error),
}

/// Per-ticker data gathered by the scrape phase.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    pub tickers: Vec<TickerData>,
    /// Every degraded field, prefixed with the ticker it belongs to.
    pub issues: Vec<String>,
    /// Tickers that came back with at least one issue.
    pub degraded: usize,
}

/// What a finished run produced.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub constituents: usize,
    pub degraded: usize,
    pub records_with_prices: usize,
    pub buy_records: usize,
    pub outputs: OutputPaths,
    pub diagnostics: Vec<String>,
}

impl PipelineReport {
    pub fn summary(&self) -> String {
        format!(
            "{} constituents ({} degraded), {} with prices, {} buy ratings, {} charts",
            self.constituents,
            self.degraded,
            self.records_with_prices,
            self.buy_records,
            self.outputs.charts.len()
        )
    }
}

pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    fetcher: &'a dyn PageFetcher,
    classifier: &'a dyn ExchangeClassifier,
    renderer: &'a dyn ChartRenderer,
    progress: &'a dyn ScrapeProgress,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a PipelineConfig,
        fetcher: &'a dyn PageFetcher,
        classifier: &'a dyn ExchangeClassifier,
        renderer: &'a dyn ChartRenderer,
        progress: &'a dyn ScrapeProgress,
    ) -> Self {
        Self {
            config,
            fetcher,
            classifier,
            renderer,
            progress,
        }
    }

    /// Fetch the index and every constituent's profile and sentiment.
    pub fn scrape(&self) -> Result<ScrapeOutcome, PipelineError> {
        let source = &self.config.source;
        info!("scraping index membership");
        let (constituents, index_issues) =
            match IndexMembershipExtractor::new(self.fetcher, source).extract() {
                Extraction::Failed(e) => return Err(PipelineError::IndexUnavailable(e)),
                other => other.unwrap_or_else_parts(Vec::new),
            };

        let mut outcome = ScrapeOutcome {
            tickers: Vec::with_capacity(constituents.len()),
            issues: index_issues.iter().map(|e| format!("index: {e}")).collect(),
            degraded: 0,
        };
        if constituents.is_empty() {
            return Err(PipelineError::NoConstituents);
        }
        info!(count = constituents.len(), "index membership retrieved");

        let profiles = CompanyProfileExtractor::new(self.fetcher, source, self.classifier);
        let sentiments = AnalystSentimentExtractor::new(self.fetcher, source);
        let total = constituents.len();

        for (i, constituent) in constituents.into_iter().enumerate() {
            let ticker = constituent.ticker.clone();
            self.progress.on_start(&ticker, i, total);

            let (profile, mut issues) = profiles
                .extract(&ticker)
                .unwrap_or_else_parts(Profile::unavailable);

            let sentiment = match profile.exchange {
                Some(exchange) => {
                    let (map, mut missing) = sentiments
                        .extract(&ticker, exchange)
                        .unwrap_or_else_parts(SentimentMap::new);
                    issues.append(&mut missing);
                    map
                }
                None => {
                    warn!(ticker = %ticker, "exchange unknown, skipping sentiment");
                    SentimentMap::new()
                }
            };

            self.progress.on_complete(&ticker, i, total, issues.len());
            if !issues.is_empty() {
                outcome.degraded += 1;
                outcome
                    .issues
                    .extend(issues.iter().map(|e| format!("{ticker}: {e}")));
            }
            outcome.tickers.push(TickerData {
                constituent,
                profile,
                sentiment,
            });
        }

        self.progress
            .on_batch_complete(total - outcome.degraded, outcome.degraded, total);
        Ok(outcome)
    }

    /// Scrape, then write both workbooks and the industry charts.
    pub fn run(&self) -> Result<PipelineReport, PipelineError> {
        let outcome = self.scrape()?;
        let output = OutputManager::new(self.config.output.clone())?;

        let assembly = assemble(&outcome.tickers);
        let mut report = PipelineReport {
            constituents: assembly.records.len(),
            degraded: outcome.degraded,
            records_with_prices: assembly.records.iter().filter(|r| r.has_prices()).count(),
            diagnostics: outcome.issues,
            ..PipelineReport::default()
        };
        report.diagnostics.extend(assembly.warnings);

        let combined = combined_frame(&assembly.records).context("building combined table")?;
        report.outputs.combined = Some(output.save_combined(&combined)?);

        let buys = buy_ratings(&assembly.records);
        report.buy_records = buys.len();
        let buy_frame = buy_ratings_frame(&buys).context("building buy-ratings table")?;
        report.outputs.buy_ratings = Some(output.save_buy_ratings(&buy_frame)?);

        let groups = group_by_industry(&assembly.records);
        let (charts, failures) = output.save_charts(&groups, self.renderer);
        report.outputs.charts = charts;
        report.diagnostics.extend(failures);

        info!("{}", report.summary());
        Ok(report)
    }
}
