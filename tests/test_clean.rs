//! Tests for row cleaning and permissive date parsing

use chrono::NaiveDate;
use fraudsift::pipeline::{clean, parse_date, read_table};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_parse_date_accepts_common_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    assert_eq!(parse_date("2024-01-15"), Some(expected));
    assert_eq!(parse_date("2024/01/15"), Some(expected));
    assert_eq!(parse_date("01/15/2024"), Some(expected));
    assert_eq!(parse_date("1/15/2024"), Some(expected));
    assert_eq!(parse_date("January 15, 2024"), Some(expected));
    assert_eq!(parse_date("15 Jan 2024"), Some(expected));
    assert_eq!(parse_date("2024-01-15 13:45:00"), Some(expected));
    assert_eq!(parse_date("  2024-01-15  "), Some(expected));
}

#[test]
fn test_parse_date_rejects_garbage() {
    assert_eq!(parse_date("not-a-date"), None);
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("2024-13-45"), None);
}

#[test]
fn test_clean_drops_nulls_and_bad_dates() {
    let (_temp_dir, csv_path) = write_csv(&messy_csv());
    let df = read_table(&csv_path).unwrap();
    let batch = clean(&df).unwrap();

    assert_eq!(batch.report.rows_before, 6);
    assert_eq!(batch.report.rows_after, 4);
    assert_eq!(batch.report.null_rows, 1);
    assert_eq!(batch.report.unparsable_dates, 1);
    assert_eq!(batch.df.height(), 4);
    assert_eq!(
        batch.dates.len(),
        batch.df.height(),
        "Parsed dates must stay aligned with the frame"
    );
}

#[test]
fn test_clean_preserves_row_order() {
    let (_temp_dir, csv_path) = write_csv(&messy_csv());
    let df = read_table(&csv_path).unwrap();
    let batch = clean(&df).unwrap();

    // Surviving rows, in upload order, with dates normalized to ISO
    let expected = [
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
    ];
    assert_eq!(batch.dates, expected);
}

#[test]
fn test_clean_rewrites_dates_as_iso() {
    let (_temp_dir, csv_path) = write_csv(
        "Transaction Date,Agency Name,Vendor,Amount\n\
         01/20/2024,Dept of Roads,Acme Paving,85.00\n",
    );
    let df = read_table(&csv_path).unwrap();
    let batch = clean(&df).unwrap();

    let dates = batch.df.column("TRANSACTION_DATE").unwrap();
    let rendered = dates.str().unwrap().get(0).unwrap();
    assert_eq!(rendered, "2024-01-20");
}

#[test]
fn test_clean_handles_fully_invalid_input() {
    let (_temp_dir, csv_path) = write_csv(
        "Transaction Date,Agency Name,Vendor,Amount\n\
         nope,Dept of Roads,Acme Paving,85.00\n\
         also nope,Parks Board,Green Supplies,12.00\n",
    );
    let df = read_table(&csv_path).unwrap();
    let batch = clean(&df).unwrap();

    assert_eq!(batch.report.rows_after, 0);
    assert_eq!(batch.df.height(), 0);
}
