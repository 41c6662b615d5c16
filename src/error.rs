//! Error types for the transaction anomaly pipeline.
//!
//! One variant per failure kind the caller can observe. Any stage failure
//! aborts the rest of the run; nothing is retried. A previous outcome held by
//! the caller is untouched because the library never keeps shared state.

use thiserror::Error;

/// Errors surfaced by a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No file was provided with the upload request.
    #[error("no file selected")]
    Input,

    /// One or more required columns are absent from the uploaded CSV.
    ///
    /// `found` lists the normalized (lower-cased, underscored) header names
    /// that were actually present, so the caller can see what arrived.
    #[error("required columns missing. Found: {found:?}")]
    Schema {
        /// Normalized header names found in the upload
        found: Vec<String>,
    },

    /// The anomaly scoring stage failed for the whole batch.
    #[error("anomaly scoring failed: {0}")]
    Model(String),

    /// Writing a report artifact (chart PNG or fraud CSV) failed.
    #[error("failed to write report artifact: {0}")]
    Report(#[source] anyhow::Error),

    /// Catch-all for any other failure, with the underlying message
    /// surfaced verbatim.
    #[error("error while processing file: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PipelineError {
    /// HTTP-equivalent status code for this error kind.
    ///
    /// Schema and input problems are the caller's fault (400); everything
    /// else is an internal failure (500).
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::Input | PipelineError::Schema { .. } => 400,
            PipelineError::Model(_) | PipelineError::Report(_) | PipelineError::Internal(_) => 500,
        }
    }
}
