//! Output manager for persisting run outputs.

pub mod chart;
pub mod workbook;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use tracing::{error, info};

use crate::assemble::IndustryGroup;
use crate::config::OutputConfig;
use chart::{ChartRenderer, IndustryChart};

/// Paths of the files written by a run.
#[derive(Debug, Clone, Default)]
pub struct OutputPaths {
    pub combined: Option<PathBuf>,
    pub buy_ratings: Option<PathBuf>,
    pub charts: Vec<PathBuf>,
}

/// Owns the output locations and writes every artifact into them.
///
/// Construction creates the output root and the plot directory. Creating a
/// directory that already exists is not an error, so building a manager
/// twice over the same config is fine.
#[derive(Debug, Clone)]
pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Result<Self> {
        let plot_dir = config.plot_dir();
        std::fs::create_dir_all(&config.root).with_context(|| {
            format!("Failed to create output directory {}", config.root.display())
        })?;
        std::fs::create_dir_all(&plot_dir)
            .with_context(|| format!("Failed to create plot directory {}", plot_dir.display()))?;
        Ok(Self { config })
    }

    pub fn plot_dir(&self) -> PathBuf {
        self.config.plot_dir()
    }

    pub fn combined_path(&self) -> PathBuf {
        self.config.combined_path()
    }

    pub fn buy_ratings_path(&self) -> PathBuf {
        self.config.buy_ratings_path()
    }

    /// Path of the chart image for `industry`.
    pub fn chart_path(&self, industry: &str) -> PathBuf {
        self.plot_dir().join(chart::chart_file_name(industry))
    }

    pub fn save_combined(&self, frame: &DataFrame) -> Result<PathBuf> {
        self.save_workbook(frame, self.combined_path())
    }

    pub fn save_buy_ratings(&self, frame: &DataFrame) -> Result<PathBuf> {
        self.save_workbook(frame, self.buy_ratings_path())
    }

    fn save_workbook(&self, frame: &DataFrame, path: PathBuf) -> Result<PathBuf> {
        info!(path = %path.display(), rows = frame.height(), "saving workbook");
        workbook::write_workbook(&path, frame)?;
        info!(path = %path.display(), "workbook saved");
        Ok(path)
    }

    /// Render one chart per chartable industry group.
    ///
    /// A group that fails to render is logged and skipped; the returned
    /// list holds only the images actually written.
    pub fn save_charts(
        &self,
        groups: &[IndustryGroup<'_>],
        renderer: &dyn ChartRenderer,
    ) -> (Vec<PathBuf>, Vec<String>) {
        let mut written = Vec::new();
        let mut failures = Vec::new();

        for group in groups {
            if !group.is_chartable() {
                info!(industry = %group.industry, "skipping chart");
                continue;
            }
            let chart = IndustryChart::from_group(group);
            let path = self.chart_path(&group.industry);
            match renderer.render(&chart, &path) {
                Ok(()) => {
                    info!(industry = %group.industry, path = %path.display(), "saved chart");
                    written.push(path);
                }
                Err(e) => {
                    error!(industry = %group.industry, error = %format!("{e:#}"), "chart failed");
                    failures.push(format!("chart for '{}' failed: {e:#}", group.industry));
                }
            }
        }

        (written, failures)
    }
}
