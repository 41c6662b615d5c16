//! Upload ingestion: holding-area persistence, header normalization, and
//! schema validation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use polars::prelude::*;

use crate::error::PipelineError;
use crate::pipeline::frame;

/// Canonical column names carried through the rest of the pipeline.
pub const CANONICAL_COLUMNS: [&str; 4] = [
    "TRANSACTION_DATE",
    "AGENCY_NAME",
    "MERCHANT_NAME",
    "TRANSACTION_AMOUNT",
];

/// Required input headers in normalized form, in canonical order.
/// `vendor` maps to the merchant name and `amount` to the transaction amount.
const REQUIRED_COLUMNS: [&str; 4] = ["transaction_date", "agency_name", "vendor", "amount"];

/// Normalize a header for matching: trimmed, lower-cased, spaces replaced by
/// underscores.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Persist the raw upload bytes to the holding area before any parsing.
///
/// The file keeps its original name and is retained regardless of whether the
/// rest of the run succeeds.
pub fn store_upload(
    upload_dir: &Path,
    filename: &str,
    bytes: &[u8],
) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(upload_dir)
        .with_context(|| format!("Failed to create upload folder: {}", upload_dir.display()))?;
    let path = upload_dir.join(filename);
    fs::write(&path, bytes)
        .with_context(|| format!("Failed to store upload: {}", path.display()))?;
    Ok(path)
}

/// Read the uploaded CSV and reduce it to the four canonical columns.
///
/// Headers are matched case/space-insensitively; extra columns are silently
/// dropped. A missing required column is a [`PipelineError::Schema`] listing
/// the normalized headers that were actually present. Amounts that cannot be
/// read as numbers become nulls for the cleaner to drop.
pub fn read_table(path: &Path) -> Result<DataFrame, PipelineError> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))?;

    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let normalized: Vec<String> = headers.iter().map(|n| normalize_header(n)).collect();

    // Resolve each required column back to the header it arrived under.
    let mut actual = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for required in REQUIRED_COLUMNS {
        match normalized.iter().position(|n| n == required) {
            Some(idx) => actual.push(headers[idx].clone()),
            None => {
                return Err(PipelineError::Schema { found: normalized });
            }
        }
    }

    let dates = frame::string_values(&df, &actual[0])?;
    let agencies = frame::string_values(&df, &actual[1])?;
    let merchants = frame::string_values(&df, &actual[2])?;
    let amounts = frame::float_values(&df, &actual[3])?;

    let canonical = DataFrame::new(vec![
        Column::new(CANONICAL_COLUMNS[0].into(), dates),
        Column::new(CANONICAL_COLUMNS[1].into(), agencies),
        Column::new(CANONICAL_COLUMNS[2].into(), merchants),
        Column::new(CANONICAL_COLUMNS[3].into(), amounts),
    ])
    .context("Failed to assemble canonical table")?;

    Ok(canonical)
}
