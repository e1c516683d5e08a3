//! SectorLens Runner: assembly, exports, charts, and pipeline orchestration.
//!
//! This crate builds on `sectorlens-core` to provide:
//! - TOML pipeline configuration with defaults for every field
//! - Record assembly, the buy-rating filter, and industry grouping
//! - Polars tables and xlsx workbook export
//! - Per-industry closing-price charts
//! - The sequential pipeline that ties scraping to output

pub mod assemble;
pub mod config;
pub mod pipeline;
pub mod reporting;
pub mod table;

pub use assemble::{
    assemble, buy_ratings, group_by_industry, Assembly, BuyRatingRecord, CombinedRecord,
    IndustryGroup, TickerData,
};
pub use config::{ConfigError, OutputConfig, PipelineConfig};
pub use pipeline::{Pipeline, PipelineError, PipelineReport, ScrapeOutcome, COMPLETION_MESSAGE};
pub use reporting::{ChartRenderer, IndustryChart, OutputManager, OutputPaths, PlottersRenderer};
pub use table::{buy_ratings_frame, combined_frame};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<PipelineConfig>();
        assert_sync::<PipelineConfig>();
        assert_send::<OutputConfig>();
        assert_sync::<OutputConfig>();
    }

    #[test]
    fn records_are_send_sync() {
        assert_send::<CombinedRecord>();
        assert_sync::<CombinedRecord>();
        assert_send::<BuyRatingRecord>();
        assert_sync::<BuyRatingRecord>();
        assert_send::<TickerData>();
        assert_sync::<TickerData>();
    }

    #[test]
    fn report_is_send_sync() {
        assert_send::<PipelineReport>();
        assert_sync::<PipelineReport>();
        assert_send::<IndustryChart>();
        assert_sync::<IndustryChart>();
    }
}
