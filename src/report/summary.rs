//! Descriptive statistics, text summaries, and table rendering.

use std::collections::HashMap;

use anyhow::Context;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use polars::prelude::*;
use serde::Serialize;

use crate::error::PipelineError;

/// The result of one successful pipeline run, owned by the caller.
///
/// Counter invariants: `fraud_count` equals the number of flagged rows,
/// `total_transactions` the cleaned row count, and `fraud_percentage` is
/// `100 * fraud_count / total_transactions` rounded to 2 decimals.
#[derive(Debug, Serialize)]
pub struct PipelineOutcome {
    /// Rendered preview of the first cleaned rows
    pub raw_preview: String,
    /// Row/null counts around the cleaning pass
    pub preprocessing_summary: String,
    /// Amount statistics and frequency breakdowns
    pub eda_summary: String,
    /// Rendered table of every flagged row
    pub fraud_table: String,
    /// File name of the amount histogram in the static asset area
    pub eda_plot: String,
    /// File name of the flagged-agency bar chart in the static asset area
    pub fraud_plot: String,
    pub fraud_count: usize,
    pub total_transactions: usize,
    pub fraud_percentage: f64,
    /// Flagged rows with all derived columns
    #[serde(skip)]
    pub flagged: DataFrame,
}

impl PipelineOutcome {
    /// JSON payload for the rendering layer. The flagged frame itself is
    /// not included; collaborators read `fraud_report.csv` instead.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Descriptive statistics of the transaction amount.
#[derive(Debug, Clone, Serialize)]
pub struct AmountStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Compute count/mean/std/min/quartiles/max over the amounts.
/// Returns `None` for an empty batch.
pub fn amount_stats(amounts: &[f64]) -> Option<AmountStats> {
    if amounts.is_empty() {
        return None;
    }
    let count = amounts.len();
    let mean = amounts.iter().sum::<f64>() / count as f64;
    // Sample standard deviation, matching the describe() convention
    let std = if count > 1 {
        let var = amounts.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };
    let mut sorted = amounts.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(AmountStats {
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Linear-interpolated quantile over an already sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Frequency counts of the `k` most common values, highest first.
/// Ties break alphabetically so the output is deterministic.
pub fn top_counts(values: &[String], k: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    let mut pairs: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs.truncate(k);
    pairs
}

/// Transaction counts per calendar month, sorted by month number.
pub fn month_counts(months: &[i32]) -> Vec<(i32, usize)> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for &month in months {
        *counts.entry(month).or_insert(0) += 1;
    }
    let mut pairs: Vec<(i32, usize)> = counts.into_iter().collect();
    pairs.sort_by_key(|&(month, _)| month);
    pairs
}

/// Render a frame as a bordered text table, optionally limited to the first
/// `limit` rows. Every cell is shown in its string form.
pub fn render_table(df: &DataFrame, limit: Option<usize>) -> Result<String, PipelineError> {
    let rows = match limit {
        Some(n) => df.height().min(n),
        None => df.height(),
    };

    let mut columns: Vec<Vec<String>> = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        let cast = col
            .cast(&DataType::String)
            .with_context(|| format!("Column '{}' is not renderable", col.name()))?;
        let values = cast
            .str()
            .with_context(|| format!("Column '{}' has an unexpected dtype", col.name()))?;
        columns.push(
            values
                .into_iter()
                .take(rows)
                .map(|v| v.unwrap_or("").to_string())
                .collect(),
        );
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| Cell::new(name.as_str()).add_attribute(Attribute::Bold)),
    );
    for i in 0..rows {
        table.add_row(columns.iter().map(|col| Cell::new(&col[i])));
    }
    Ok(table.to_string())
}

/// Text block describing what the cleaner did.
pub fn render_preprocessing_summary(report: &crate::pipeline::clean::CleaningReport) -> String {
    format!(
        "Initial rows: {}\n\
         Rows with missing values: {}\n\
         Rows with unparsable dates: {}\n\
         Rows after cleaning: {}",
        report.rows_before, report.null_rows, report.unparsable_dates, report.rows_after
    )
}

/// Text block with the amount statistics and frequency breakdowns.
pub fn render_eda_summary(
    stats: &AmountStats,
    top_agencies: &[(String, usize)],
    top_merchants: &[(String, usize)],
    month_counts: &[(i32, usize)],
) -> String {
    let mut blocks = Vec::new();

    let mut agencies = String::from("Top 5 Agencies:");
    for (name, count) in top_agencies {
        agencies.push_str(&format!("\n  {:<40} {}", name, count));
    }
    blocks.push(agencies);

    let mut merchants = String::from("Top 5 Merchants:");
    for (name, count) in top_merchants {
        merchants.push_str(&format!("\n  {:<40} {}", name, count));
    }
    blocks.push(merchants);

    blocks.push(format!(
        "Transaction Amount Stats:\n  \
         count  {}\n  \
         mean   {:.2}\n  \
         std    {:.2}\n  \
         min    {:.2}\n  \
         25%    {:.2}\n  \
         50%    {:.2}\n  \
         75%    {:.2}\n  \
         max    {:.2}",
        stats.count, stats.mean, stats.std, stats.min, stats.q25, stats.median, stats.q75, stats.max
    ));

    let mut months = String::from("Transactions per Month:");
    for (month, count) in month_counts {
        months.push_str(&format!("\n  {:>2}  {}", month, count));
    }
    blocks.push(months);

    blocks.join("\n\n")
}
