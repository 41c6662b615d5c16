//! Report module - summaries, charts, and artifacts for a scored batch.

pub mod artifacts;
pub mod charts;
pub mod summary;

pub use summary::{AmountStats, PipelineOutcome};

use std::fs;

use anyhow::{anyhow, Context};
use polars::prelude::*;

use crate::error::PipelineError;
use crate::pipeline::clean::CleaningReport;
use crate::pipeline::score::ANOMALY_FLAG;
use crate::pipeline::{frame, PipelineConfig};

/// Fixed artifact names, overwritten on every successful run.
pub const FRAUD_REPORT_FILE: &str = "fraud_report.csv";
pub const EDA_PLOT_FILE: &str = "eda_plot.png";
pub const FRAUD_PLOT_FILE: &str = "fraud_agencies.png";

/// Summarize a scored batch, write the three artifacts, and assemble the
/// caller-owned outcome.
///
/// Any artifact-writing failure aborts the run with a report error; the
/// outcome is only constructed once every artifact is on disk.
pub fn build_report(
    scored: &DataFrame,
    cleaning: &CleaningReport,
    cfg: &PipelineConfig,
) -> Result<PipelineOutcome, PipelineError> {
    fs::create_dir_all(&cfg.result_dir)
        .with_context(|| format!("Failed to create result folder: {}", cfg.result_dir.display()))
        .map_err(PipelineError::Report)?;
    fs::create_dir_all(&cfg.static_dir)
        .with_context(|| format!("Failed to create static folder: {}", cfg.static_dir.display()))
        .map_err(PipelineError::Report)?;

    let labels = frame::required_ints(scored, "Anomaly")?;
    let mask: Vec<bool> = labels.iter().map(|&v| v == ANOMALY_FLAG).collect();
    let flagged = scored
        .filter(&BooleanChunked::from_slice("mask".into(), &mask))
        .context("Failed to select flagged rows")?;

    let total_transactions = scored.height();
    let fraud_count = flagged.height();
    let fraud_percentage = if total_transactions > 0 {
        let pct = 100.0 * fraud_count as f64 / total_transactions as f64;
        (pct * 100.0).round() / 100.0
    } else {
        0.0
    };

    let amounts = frame::required_floats(scored, "TRANSACTION_AMOUNT")?;
    let agencies = frame::required_strings(scored, "AGENCY_NAME")?;
    let merchants = frame::required_strings(scored, "MERCHANT_NAME")?;
    let months = frame::required_ints(scored, "Month")?;
    let flagged_agencies = frame::required_strings(&flagged, "AGENCY_NAME")?;

    let stats = summary::amount_stats(&amounts)
        .ok_or_else(|| PipelineError::Internal(anyhow!("no amounts to summarize")))?;
    let top_agencies = summary::top_counts(&agencies, 5);
    let top_merchants = summary::top_counts(&merchants, 5);
    let month_counts = summary::month_counts(&months);

    charts::render_amount_histogram(&amounts, &cfg.static_dir.join(EDA_PLOT_FILE))
        .map_err(PipelineError::Report)?;
    let fraud_agency_counts = summary::top_counts(&flagged_agencies, 8);
    charts::render_fraud_agencies(&fraud_agency_counts, &cfg.static_dir.join(FRAUD_PLOT_FILE))
        .map_err(PipelineError::Report)?;
    artifacts::write_fraud_report(&flagged, &cfg.result_dir.join(FRAUD_REPORT_FILE))
        .map_err(PipelineError::Report)?;

    let raw_preview = summary::render_table(scored, Some(5))?;
    let fraud_table = summary::render_table(&flagged, None)?;
    let preprocessing_summary = summary::render_preprocessing_summary(cleaning);
    let eda_summary =
        summary::render_eda_summary(&stats, &top_agencies, &top_merchants, &month_counts);

    Ok(PipelineOutcome {
        raw_preview,
        preprocessing_summary,
        eda_summary,
        fraud_table,
        eda_plot: EDA_PLOT_FILE.to_string(),
        fraud_plot: FRAUD_PLOT_FILE.to_string(),
        fraud_count,
        total_transactions,
        fraud_percentage,
        flagged,
    })
}
