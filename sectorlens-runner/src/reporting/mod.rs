//! Reporting and export: workbooks and per-industry charts.

pub mod artifacts;

pub use artifacts::chart::{
    chart_file_name, price_extremes, ChartRenderer, IndustryChart, PlottersRenderer, SeriesPlot,
};
pub use artifacts::workbook::write_workbook;
pub use artifacts::{OutputManager, OutputPaths};
