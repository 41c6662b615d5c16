//! Fraudsift: transaction anomaly-detection library
//!
//! Ingests a CSV of government transactions, cleans it, derives calendar and
//! category features, flags outliers with a seeded isolation forest, and
//! writes the report artifacts. One call runs the whole batch; the caller
//! owns the result.

pub mod auth;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::PipelineError;
pub use pipeline::{run, run_upload, PipelineConfig};
pub use report::PipelineOutcome;
