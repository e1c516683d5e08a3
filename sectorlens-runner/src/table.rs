//! Tabular views of assembled records.
//!
//! Column names and order are what the workbooks show. The price series is
//! not a column: it only feeds the charts.

use crate::assemble::{BuyRatingRecord, CombinedRecord};
use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};

pub const COMBINED_COLUMNS: [&str; 9] = [
    "Ticker",
    "Company Name",
    "Industry",
    "Forward P/E",
    "P/E Difference",
    "Exchange",
    "Analyst Rating",
    "Upside/Downside",
    "News Sentiment",
];

pub const BUY_RATING_COLUMNS: [&str; 5] = [
    "Company Name",
    "Analyst Rating",
    "Upside/Downside",
    "News Sentiment",
    "P/E Difference",
];

fn text_column<T>(name: &str, rows: &[T], field: impl Fn(&T) -> &str) -> Column {
    let values: Vec<String> = rows.iter().map(|r| field(r).to_string()).collect();
    Series::new(name.into(), values).into()
}

fn number_column<T>(name: &str, rows: &[T], field: impl Fn(&T) -> Option<f64>) -> Column {
    let values: Vec<Option<f64>> = rows.iter().map(field).collect();
    Series::new(name.into(), values).into()
}

/// One row per combined record, prices excluded.
pub fn combined_frame(records: &[CombinedRecord]) -> PolarsResult<DataFrame> {
    let [ticker, company, industry, forward_pe, pe_diff, exchange, rating, upside, news] =
        COMBINED_COLUMNS;
    DataFrame::new(vec![
        text_column(ticker, records, |r| &r.ticker),
        text_column(company, records, |r| &r.company_name),
        text_column(industry, records, |r| &r.industry),
        number_column(forward_pe, records, |r| r.forward_pe),
        number_column(pe_diff, records, |r| r.pe_difference),
        text_column(exchange, records, |r| &r.exchange),
        text_column(rating, records, |r| &r.analyst_rating),
        text_column(upside, records, |r| &r.upside_downside),
        text_column(news, records, |r| &r.news_sentiment),
    ])
}

/// One row per buy-rated record.
pub fn buy_ratings_frame(records: &[BuyRatingRecord]) -> PolarsResult<DataFrame> {
    let [company, rating, upside, news, pe_diff] = BUY_RATING_COLUMNS;
    DataFrame::new(vec![
        text_column(company, records, |r| &r.company_name),
        text_column(rating, records, |r| &r.analyst_rating),
        text_column(upside, records, |r| &r.upside_downside),
        text_column(news, records, |r| &r.news_sentiment),
        number_column(pe_diff, records, |r| r.pe_difference),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    fn record(ticker: &str, forward_pe: Option<f64>) -> CombinedRecord {
        CombinedRecord {
            ticker: ticker.into(),
            company_name: format!("{ticker} Inc."),
            industry: "Semiconductors".into(),
            forward_pe,
            pe_difference: forward_pe.map(|f| f - 10.0),
            exchange: "NASDAQ".into(),
            prices: Vec::new(),
            analyst_rating: "Buy".into(),
            upside_downside: "N/A".into(),
            news_sentiment: "0.5".into(),
        }
    }

    #[test]
    fn combined_frame_has_fixed_columns() {
        let df = combined_frame(&[record("NVDA", Some(30.0)), record("AMD", None)]).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, COMBINED_COLUMNS.to_vec());
        assert_eq!(df.column("Forward P/E").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Forward P/E").unwrap().null_count(), 1);
    }

    #[test]
    fn empty_input_still_has_header() {
        let df = buy_ratings_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), BUY_RATING_COLUMNS.len());
    }

    #[test]
    fn buy_frame_keeps_row_order() {
        let rows: Vec<BuyRatingRecord> = [record("B", Some(1.0)), record("A", Some(2.0))]
            .iter()
            .map(BuyRatingRecord::from)
            .collect();
        let df = buy_ratings_frame(&rows).unwrap();
        let column = df.column("Company Name").unwrap();
        let names: Vec<String> = column
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        assert_eq!(names, vec!["B Inc.", "A Inc."]);
    }
}
