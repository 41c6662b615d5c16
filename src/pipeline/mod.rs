//! Pipeline module - the linear upload-to-report run.
//!
//! Stage order is fixed: ingest -> clean -> features -> score -> report.
//! Execution is synchronous and request-scoped; there is no cancellation,
//! timeout, or retry. Overlapping runs sharing the same directories are not
//! coordinated: they race on the fixed-name artifact files and the last
//! successful run wins. That is a known limitation, not a supported mode.

pub mod clean;
pub mod features;
pub mod forest;
pub mod frame;
pub mod ingest;
pub mod scale;
pub mod score;

pub use clean::{clean, parse_date, CleanedBatch, CleaningReport};
pub use features::add_features;
pub use forest::IsolationForest;
pub use ingest::{read_table, store_upload};
pub use scale::StandardScaler;
pub use score::{score, ANOMALY_FLAG, FEATURE_COLUMNS, NORMAL_FLAG};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::PipelineError;
use crate::report::{self, PipelineOutcome};

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Holding area for raw uploads (original filenames preserved)
    pub upload_dir: PathBuf,
    /// Results area, receives `fraud_report.csv`
    pub result_dir: PathBuf,
    /// Static asset area, receives the chart PNGs
    pub static_dir: PathBuf,
    /// Number of isolation trees in the ensemble
    pub trees: usize,
    /// Expected fraction of anomalous rows
    pub contamination: f64,
    /// Seed for the model's internal randomness
    pub seed: u64,
}

impl PipelineConfig {
    /// Config with the model defaults: 100 trees, 2% contamination, seed 42.
    pub fn new(upload_dir: PathBuf, result_dir: PathBuf, static_dir: PathBuf) -> Self {
        Self {
            upload_dir,
            result_dir,
            static_dir,
            trees: 100,
            contamination: 0.02,
            seed: 42,
        }
    }
}

/// Run the full pipeline for one uploaded file.
///
/// `file` is the upload's original name and raw bytes; `None` means the
/// request carried no file and is rejected up front. On success the caller
/// owns the returned [`PipelineOutcome`]; on failure the caller's previous
/// outcome (if it kept one) is simply not replaced.
pub fn run_upload(
    file: Option<(&str, &[u8])>,
    cfg: &PipelineConfig,
) -> Result<PipelineOutcome, PipelineError> {
    let (filename, bytes) = file.ok_or(PipelineError::Input)?;
    let stored = ingest::store_upload(&cfg.upload_dir, filename, bytes)?;
    let raw = ingest::read_table(&stored)?;
    let batch = clean::clean(&raw)?;
    let featured = features::add_features(&batch)?;
    let scored = score::score(&featured, cfg)?;
    report::build_report(&scored, &batch.report, cfg)
}

/// Convenience entry for callers that already have the file on disk.
pub fn run(path: &Path, cfg: &PipelineConfig) -> Result<PipelineOutcome, PipelineError> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload.csv");
    run_upload(Some((filename, &bytes)), cfg)
}
