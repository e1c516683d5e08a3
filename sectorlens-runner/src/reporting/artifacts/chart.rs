//! Per-industry closing-price charts.
//!
//! `IndustryChart` is the renderer-independent description of one image:
//! one line per ticker with prices, plus max/min annotations. Rendering goes
//! through `ChartRenderer`; `PlottersRenderer` draws PNGs.

use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use sectorlens_core::domain::PricePoint;
use std::path::Path;

use crate::assemble::IndustryGroup;

/// File name of the chart for `industry`: spaces become underscores.
pub fn chart_file_name(industry: &str) -> String {
    format!("{}_prices.png", industry.replace(' ', "_"))
}

/// Highest and lowest close in series order.
///
/// Ties resolve to the first occurrence. `None` for an empty series.
pub fn price_extremes(points: &[PricePoint]) -> Option<(PricePoint, PricePoint)> {
    let first = *points.first()?;
    let mut max = first;
    let mut min = first;
    for p in &points[1..] {
        if p.close > max.close {
            max = *p;
        }
        if p.close < min.close {
            min = *p;
        }
    }
    Some((max, min))
}

/// One ticker's line on an industry chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPlot {
    pub ticker: String,
    pub points: Vec<PricePoint>,
    pub max: PricePoint,
    pub min: PricePoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndustryChart {
    pub industry: String,
    pub title: String,
    pub series: Vec<SeriesPlot>,
}

impl IndustryChart {
    /// Build the chart for a group; records without prices draw nothing.
    pub fn from_group(group: &IndustryGroup<'_>) -> Self {
        let series = group
            .records
            .iter()
            .filter_map(|r| {
                let (max, min) = price_extremes(&r.prices)?;
                Some(SeriesPlot {
                    ticker: r.ticker.clone(),
                    points: r.prices.clone(),
                    max,
                    min,
                })
            })
            .collect();

        Self {
            industry: group.industry.clone(),
            title: format!("Daily Closing Prices for {} Stocks (2023)", group.industry),
            series,
        }
    }

    pub fn file_name(&self) -> String {
        chart_file_name(&self.industry)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Earliest and latest date across every series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.date));
        let (lo, hi) = dates.fold((None, None), |(lo, hi): (Option<NaiveDate>, Option<NaiveDate>), d| {
            (Some(lo.map_or(d, |l| l.min(d))), Some(hi.map_or(d, |h| h.max(d))))
        });
        Some((lo?, hi?))
    }

    /// Lowest and highest close across every series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let lo = self.series.iter().map(|s| s.min.close).reduce(f64::min)?;
        let hi = self.series.iter().map(|s| s.max.close).reduce(f64::max)?;
        Some((lo, hi))
    }
}

/// Draws a chart to an image file.
pub trait ChartRenderer {
    fn render(&self, chart: &IndustryChart, path: &Path) -> Result<()>;
}

/// PNG renderer on the plotters bitmap backend.
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 800,
        }
    }
}

/// Vertical offset of the max/min labels from their points, in price units.
const ANNOTATION_OFFSET: f64 = 1.0;

fn draw_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow!("chart drawing failed: {e}")
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, chart: &IndustryChart, path: &Path) -> Result<()> {
        let (x_lo, mut x_hi) = chart.date_range().unwrap_or_else(|| {
            let today = NaiveDate::default();
            (today, today)
        });
        if x_hi <= x_lo {
            x_hi = x_lo + Duration::days(1);
        }
        let (y_lo, y_hi) = chart.price_range().unwrap_or((0.0, 1.0));
        let pad = ((y_hi - y_lo) * 0.05).max(ANNOTATION_OFFSET * 2.0);

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_lo..x_hi, (y_lo - pad)..(y_hi + pad))
            .map_err(draw_err)?;

        ctx.configure_mesh()
            .x_desc("Date")
            .y_desc("Closing Price (USD)")
            .draw()
            .map_err(draw_err)?;

        for (i, s) in chart.series.iter().enumerate() {
            let color = Palette99::pick(i).to_rgba();
            ctx.draw_series(LineSeries::new(
                s.points.iter().map(|p| (p.date, p.close)),
                color.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(s.ticker.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

            for (point, offset, marker) in [
                (s.max, ANNOTATION_OFFSET, GREEN),
                (s.min, -ANNOTATION_OFFSET, RED),
            ] {
                ctx.draw_series(std::iter::once(Circle::new(
                    (point.date, point.close),
                    4,
                    marker.filled(),
                )))
                .map_err(draw_err)?;
                ctx.draw_series(std::iter::once(Text::new(
                    format!("{:.2}", point.close),
                    (point.date, point.close + offset),
                    ("sans-serif", 14).into_font(),
                )))
                .map_err(draw_err)?;
            }
        }

        if !chart.is_empty() {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }
}
