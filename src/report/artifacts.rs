//! CSV artifact for the flagged-row subset.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Write the flagged rows, with all derived columns, to `path`.
/// The file is fully rewritten on every run.
pub fn write_fraud_report(flagged: &DataFrame, path: &Path) -> Result<()> {
    let mut df = flagged.clone();
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(&mut df)
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    Ok(())
}
