//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use fraudsift::pipeline::PipelineConfig;

/// Write raw CSV text into a fresh temp dir and return (dir, path).
pub fn write_csv(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("transactions.csv");
    std::fs::write(&csv_path, content).unwrap();
    (temp_dir, csv_path)
}

/// Pipeline config rooted in a temp dir, with the model defaults.
pub fn test_config(temp_dir: &TempDir) -> PipelineConfig {
    PipelineConfig::new(
        temp_dir.path().join("upload"),
        temp_dir.path().join("result"),
        temp_dir.path().join("static"),
    )
}

/// A small upload exercising the messy-input paths:
/// spaced/mixed-case headers, an extra column, one row with a missing
/// amount, and one row with an unparsable date. 4 of the 6 rows survive
/// cleaning.
pub fn messy_csv() -> String {
    "Transaction Date,Agency Name,Vendor,Amount,Notes\n\
     2024-01-15,Dept of Roads,Acme Paving,120.50,ok\n\
     01/20/2024,Dept of Roads,Acme Paving,85.00,ok\n\
     2024-02-03,Parks Board,Green Supplies,310.75,ok\n\
     2024-02-10,Parks Board,Green Supplies,,missing amount\n\
     not-a-date,City Library,Book Depot,45.00,bad date\n\
     2024-03-07,City Library,Book Depot,99.99,ok\n"
        .to_string()
}

/// Synthetic upload with `normal_rows` unremarkable transactions and
/// `outlier_rows` drawn from a far-away amount range. Deterministic for a
/// given seed.
pub fn synthetic_csv(normal_rows: usize, outlier_rows: usize, seed: u64) -> String {
    let agencies = [
        "Dept of Roads",
        "Parks Board",
        "City Library",
        "Water Authority",
        "Fire Service",
        "Health Office",
    ];
    let vendors = [
        "Acme Paving",
        "Green Supplies",
        "Book Depot",
        "Pipe Works",
        "Hose and Co",
        "MediSupply",
        "Fleet Fuel",
        "Office Plus",
        "BuildRight",
        "CleanCity",
    ];

    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::from("Transaction Date,Agency Name,Vendor,Amount\n");
    for _ in 0..normal_rows {
        let month = rng.gen_range(1..=12u32);
        let day = rng.gen_range(1..=28u32);
        let amount: f64 = rng.gen_range(50.0..1500.0);
        writeln!(
            out,
            "2024-{:02}-{:02},{},{},{:.2}",
            month,
            day,
            agencies[rng.gen_range(0..agencies.len())],
            vendors[rng.gen_range(0..vendors.len())],
            amount
        )
        .unwrap();
    }
    for _ in 0..outlier_rows {
        let month = rng.gen_range(1..=12u32);
        let day = rng.gen_range(1..=28u32);
        let amount: f64 = rng.gen_range(250_000.0..500_000.0);
        writeln!(
            out,
            "2024-{:02}-{:02},{},{},{:.2}",
            month,
            day,
            agencies[rng.gen_range(0..agencies.len())],
            vendors[rng.gen_range(0..vendors.len())],
            amount
        )
        .unwrap();
    }
    out
}
