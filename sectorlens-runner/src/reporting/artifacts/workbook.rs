//! Workbook export (XLSX).
//!
//! One sheet, a bold header row of column names, one row per frame row, no
//! index column. Null numbers are left as blank cells.

use anyhow::{bail, Context, Result};
use polars::prelude::{DataFrame, DataType};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

pub fn write_workbook(path: &Path, frame: &DataFrame) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = Format::new().set_bold();

    for (col_idx, column) in frame.get_columns().iter().enumerate() {
        let col = u16::try_from(col_idx).context("too many columns for a worksheet")?;
        sheet
            .write_string_with_format(0, col, column.name().as_str(), &header)
            .with_context(|| format!("Failed to write header {}", column.name()))?;

        let series = column.as_materialized_series();
        match series.dtype() {
            DataType::String => {
                for (row_idx, value) in series.str()?.into_iter().enumerate() {
                    if let Some(value) = value {
                        sheet.write_string(sheet_row(row_idx)?, col, value)?;
                    }
                }
            }
            DataType::Float64 => {
                for (row_idx, value) in series.f64()?.into_iter().enumerate() {
                    if let Some(value) = value {
                        sheet.write_number(sheet_row(row_idx)?, col, value)?;
                    }
                }
            }
            other => bail!("unsupported column type {other} for column {}", column.name()),
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write workbook {}", path.display()))?;
    Ok(())
}

/// Worksheet row for a frame row (row 0 is the header).
fn sheet_row(row_idx: usize) -> Result<u32> {
    u32::try_from(row_idx + 1).context("too many rows for a worksheet")
}
