//! Feature building: calendar features and dense category codes.

use std::collections::HashMap;

use anyhow::Context;
use chrono::Datelike;
use polars::prelude::*;

use crate::error::PipelineError;
use crate::pipeline::clean::CleanedBatch;
use crate::pipeline::frame;
use crate::pipeline::ingest::CANONICAL_COLUMNS;

/// Derived feature columns appended to the cleaned table, in order.
pub const DERIVED_COLUMNS: [&str; 4] = ["Month", "DayOfWeek", "AGENCY_CODE", "MERCHANT_CODE"];

/// Assign dense integer codes by first-seen distinct value.
///
/// Codes are deterministic for a single run but carry no meaning across
/// uploads; they exist only so the scorer has numeric inputs.
fn dense_codes(values: &[String]) -> Vec<i32> {
    let mut table: HashMap<&str, i32> = HashMap::new();
    values
        .iter()
        .map(|v| {
            let next = table.len() as i32;
            *table.entry(v.as_str()).or_insert(next)
        })
        .collect()
}

/// Append `Month` (1-12), `DayOfWeek` (Monday=0), `AGENCY_CODE` and
/// `MERCHANT_CODE` to a cleaned batch.
pub fn add_features(batch: &CleanedBatch) -> Result<DataFrame, PipelineError> {
    let months: Vec<i32> = batch.dates.iter().map(|d| d.month() as i32).collect();
    let weekdays: Vec<i32> = batch
        .dates
        .iter()
        .map(|d| d.weekday().num_days_from_monday() as i32)
        .collect();

    let agencies = frame::required_strings(&batch.df, CANONICAL_COLUMNS[1])?;
    let merchants = frame::required_strings(&batch.df, CANONICAL_COLUMNS[2])?;

    let df = batch
        .df
        .hstack(&[
            Column::new(DERIVED_COLUMNS[0].into(), months),
            Column::new(DERIVED_COLUMNS[1].into(), weekdays),
            Column::new(DERIVED_COLUMNS[2].into(), dense_codes(&agencies)),
            Column::new(DERIVED_COLUMNS[3].into(), dense_codes(&merchants)),
        ])
        .context("Failed to append derived feature columns")?;

    Ok(df)
}
