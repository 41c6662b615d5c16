//! Command-line argument definitions using clap

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::PipelineConfig;

/// Fraudsift - flag anomalous rows in a government transaction CSV
#[derive(Parser, Debug)]
#[command(name = "fraudsift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV of transactions.
    /// Required headers (matched case/space-insensitively):
    /// Transaction Date, Agency Name, Vendor, Amount.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Holding area where the raw upload is kept
    #[arg(long, default_value = "upload")]
    pub upload_dir: PathBuf,

    /// Results area receiving fraud_report.csv
    #[arg(long, default_value = "result")]
    pub result_dir: PathBuf,

    /// Static asset area receiving the chart PNGs
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Number of isolation trees in the ensemble
    #[arg(long, default_value = "100")]
    pub trees: usize,

    /// Expected fraction of anomalous rows, in (0.0, 0.5]
    #[arg(long, default_value = "0.02", value_parser = validate_contamination)]
    pub contamination: f64,

    /// Random seed; the same input and seed always flag the same rows
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Print the first cleaned rows and the EDA summary after the run
    #[arg(long, default_value = "false")]
    pub show_summary: bool,
}

impl Cli {
    /// Build the pipeline configuration from the parsed arguments.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            upload_dir: self.upload_dir.clone(),
            result_dir: self.result_dir.clone(),
            static_dir: self.static_dir.clone(),
            trees: self.trees,
            contamination: self.contamination,
            seed: self.seed,
        }
    }
}

/// Validator for the contamination parameter
fn validate_contamination(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value <= 0.5 {
        Ok(value)
    } else {
        Err(format!(
            "contamination must be in (0.0, 0.5], got {}",
            value
        ))
    }
}
