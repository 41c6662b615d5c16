//! Anomaly scoring stage: standardize the feature matrix and run the forest.

use ndarray::Array2;
use polars::prelude::*;

use crate::error::PipelineError;
use crate::pipeline::forest::IsolationForest;
use crate::pipeline::frame;
use crate::pipeline::scale::StandardScaler;
use crate::pipeline::PipelineConfig;

/// Feature columns fed to the outlier model, in matrix order.
pub const FEATURE_COLUMNS: [&str; 5] = [
    "TRANSACTION_AMOUNT",
    "AGENCY_CODE",
    "MERCHANT_CODE",
    "Month",
    "DayOfWeek",
];

/// Label written for rows the model considers outliers.
pub const ANOMALY_FLAG: i32 = -1;
/// Label written for unremarkable rows.
pub const NORMAL_FLAG: i32 = 1;

/// Score a featured batch and append the binary `Anomaly` column.
///
/// Standardization statistics and the forest are fit fresh on this batch;
/// nothing is reused across uploads. Either the whole batch scores or the
/// run aborts with a model error.
pub fn score(df: &DataFrame, cfg: &PipelineConfig) -> Result<DataFrame, PipelineError> {
    let rows = df.height();
    if rows == 0 {
        return Err(PipelineError::Model(
            "no rows left to score after cleaning".to_string(),
        ));
    }

    let mut matrix = Array2::<f64>::zeros((rows, FEATURE_COLUMNS.len()));
    for (j, name) in FEATURE_COLUMNS.iter().enumerate() {
        let values = frame::required_floats(df, name).map_err(|e| {
            PipelineError::Model(format!("feature column '{}' unusable: {}", name, e))
        })?;
        for (i, v) in values.into_iter().enumerate() {
            matrix[[i, j]] = v;
        }
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(PipelineError::Model(
            "feature matrix contains non-finite values".to_string(),
        ));
    }

    let scaled = StandardScaler::fit_transform(&matrix);
    let forest = IsolationForest::fit(&scaled, cfg.trees, cfg.seed);
    let flags = forest.detect(&scaled, cfg.contamination);

    let labels: Vec<i32> = flags
        .iter()
        .map(|&flagged| if flagged { ANOMALY_FLAG } else { NORMAL_FLAG })
        .collect();

    df.hstack(&[Column::new("Anomaly".into(), labels)])
        .map_err(|e| PipelineError::Model(format!("failed to attach anomaly labels: {}", e)))
}
