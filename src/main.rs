//! Fraudsift CLI front end
//!
//! Runs the anomaly-detection pipeline over one transaction CSV and prints
//! the run summary. The stages mirror `pipeline::run_upload`, surfaced
//! step by step for the terminal.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use fraudsift::cli::Cli;
use fraudsift::pipeline::{add_features, clean, read_table, score, store_upload};
use fraudsift::report::{self, PipelineOutcome, FRAUD_REPORT_FILE};
use fraudsift::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = cli.pipeline_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        &cli.result_dir,
        cfg.trees,
        cfg.contamination,
        cfg.seed,
    );

    // Step 1: Ingest - store the upload and validate the schema
    print_step_header(1, "Ingest");
    let step_start = Instant::now();
    let bytes = fs::read(&cli.input)
        .with_context(|| format!("Failed to read input file: {}", cli.input.display()))?;
    let filename = cli
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload.csv");
    let stored = store_upload(&cfg.upload_dir, filename, &bytes)?;
    let raw = read_table(&stored)?;
    print_success("Schema validated");
    println!("      Rows: {}", style(raw.height()).yellow());
    print_step_time(step_start.elapsed());

    // Step 2: Clean - drop nulls and unparsable dates
    print_step_header(2, "Clean");
    let step_start = Instant::now();
    let batch = clean(&raw)?;
    let dropped = batch.report.rows_before - batch.report.rows_after;
    if dropped == 0 {
        print_info("No rows dropped");
    } else {
        print_count("row(s) dropped", dropped);
    }
    print_success(&format!("{} rows remain", batch.report.rows_after));
    print_step_time(step_start.elapsed());

    // Step 3: Feature engineering
    print_step_header(3, "Feature Engineering");
    let step_start = Instant::now();
    let featured = add_features(&batch)?;
    print_success("Derived Month, DayOfWeek and category codes");
    print_step_time(step_start.elapsed());

    // Step 4: Anomaly scoring
    print_step_header(4, "Anomaly Scoring");
    let step_start = Instant::now();
    let spinner = create_spinner("Fitting isolation forest...");
    let scored = score(&featured, &cfg)?;
    finish_with_success(&spinner, "Scoring complete");
    print_step_time(step_start.elapsed());

    // Step 5: Report artifacts
    print_step_header(5, "Report");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing report artifacts...");
    let outcome = report::build_report(&scored, &batch.report, &cfg)?;
    finish_with_success(
        &spinner,
        &format!(
            "Saved to {}",
            cfg.result_dir.join(FRAUD_REPORT_FILE).display()
        ),
    );
    print_step_time(step_start.elapsed());

    if cli.show_summary {
        println!();
        for line in outcome.raw_preview.lines() {
            println!("    {}", line);
        }
        println!();
        for line in outcome.eda_summary.lines() {
            println!("    {}", line);
        }
    }

    display_summary(&outcome);
    print_completion();

    Ok(())
}

/// Render the run summary table.
fn display_summary(outcome: &PipelineOutcome) {
    println!();
    println!(
        "    {} {}",
        style("🚩").cyan(),
        style("RUN SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("Total Transactions"),
        Cell::new(outcome.total_transactions),
    ]);
    table.add_row(vec![
        Cell::new("Flagged as Anomalous"),
        Cell::new(outcome.fraud_count).fg(if outcome.fraud_count == 0 {
            Color::White
        } else {
            Color::Red
        }),
    ]);
    table.add_row(vec![
        Cell::new("Fraud Percentage"),
        Cell::new(format!("{:.2}%", outcome.fraud_percentage))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Amount Histogram"),
        Cell::new(&outcome.eda_plot),
    ]);
    table.add_row(vec![
        Cell::new("Agency Chart"),
        Cell::new(&outcome.fraud_plot),
    ]);

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
