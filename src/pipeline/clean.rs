//! Row cleaning: null removal and permissive date parsing.

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::error::PipelineError;
use crate::pipeline::frame;
use crate::pipeline::ingest::CANONICAL_COLUMNS;

/// Date-only formats tried in order, most common first. Month-first forms
/// win ambiguous matches, mirroring the upstream data source.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Timestamp formats whose date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Counts recorded around the cleaning pass. Diagnostics only; nothing
/// downstream reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub null_rows: usize,
    pub unparsable_dates: usize,
}

/// A cleaned batch: the canonical frame (dates re-emitted as ISO strings)
/// plus the parsed dates aligned row-for-row with it.
#[derive(Debug, Clone)]
pub struct CleanedBatch {
    pub df: DataFrame,
    pub dates: Vec<NaiveDate>,
    pub report: CleaningReport,
}

/// Parse a date string against the accepted formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Remove structurally invalid rows, preserving the order of survivors.
///
/// A row is dropped when any canonical column is null or its date does not
/// parse under any accepted format.
pub fn clean(df: &DataFrame) -> Result<CleanedBatch, PipelineError> {
    let rows_before = df.height();

    let raw_dates = frame::string_values(df, CANONICAL_COLUMNS[0])?;
    let raw_agencies = frame::string_values(df, CANONICAL_COLUMNS[1])?;
    let raw_merchants = frame::string_values(df, CANONICAL_COLUMNS[2])?;
    let raw_amounts = frame::float_values(df, CANONICAL_COLUMNS[3])?;

    let mut iso_dates = Vec::with_capacity(rows_before);
    let mut agencies = Vec::with_capacity(rows_before);
    let mut merchants = Vec::with_capacity(rows_before);
    let mut amounts = Vec::with_capacity(rows_before);
    let mut dates = Vec::with_capacity(rows_before);
    let mut null_rows = 0usize;
    let mut unparsable_dates = 0usize;

    for i in 0..rows_before {
        let (date, agency, merchant, amount) = match (
            &raw_dates[i],
            &raw_agencies[i],
            &raw_merchants[i],
            raw_amounts[i],
        ) {
            (Some(d), Some(a), Some(m), Some(v)) => (d, a, m, v),
            _ => {
                null_rows += 1;
                continue;
            }
        };
        let parsed = match parse_date(date) {
            Some(p) => p,
            None => {
                unparsable_dates += 1;
                continue;
            }
        };
        iso_dates.push(parsed.format("%Y-%m-%d").to_string());
        agencies.push(agency.clone());
        merchants.push(merchant.clone());
        amounts.push(amount);
        dates.push(parsed);
    }

    let rows_after = dates.len();
    let cleaned = DataFrame::new(vec![
        Column::new(CANONICAL_COLUMNS[0].into(), iso_dates),
        Column::new(CANONICAL_COLUMNS[1].into(), agencies),
        Column::new(CANONICAL_COLUMNS[2].into(), merchants),
        Column::new(CANONICAL_COLUMNS[3].into(), amounts),
    ])
    .context("Failed to assemble cleaned table")?;

    Ok(CleanedBatch {
        df: cleaned,
        dates,
        report: CleaningReport {
            rows_before,
            rows_after,
            null_rows,
            unparsable_dates,
        },
    })
}
