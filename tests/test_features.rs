//! Tests for calendar features and dense category codes

use fraudsift::pipeline::{add_features, clean, read_table};

#[path = "common/mod.rs"]
mod common;

use common::*;

fn featured_frame(csv: &str) -> polars::prelude::DataFrame {
    let (_temp_dir, csv_path) = write_csv(csv);
    let df = read_table(&csv_path).unwrap();
    let batch = clean(&df).unwrap();
    add_features(&batch).unwrap()
}

#[test]
fn test_calendar_features() {
    // 2024-01-01 was a Monday
    let df = featured_frame(
        "Transaction Date,Agency Name,Vendor,Amount\n\
         2024-01-01,Dept of Roads,Acme Paving,10.00\n\
         2024-01-07,Dept of Roads,Acme Paving,20.00\n\
         2024-12-25,Dept of Roads,Acme Paving,30.00\n",
    );

    let months: Vec<i32> = df
        .column("Month")
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    let weekdays: Vec<i32> = df
        .column("DayOfWeek")
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect();

    assert_eq!(months, vec![1, 1, 12]);
    // Monday=0, Sunday=6; Christmas 2024 was a Wednesday
    assert_eq!(weekdays, vec![0, 6, 2]);
}

#[test]
fn test_category_codes_are_first_seen_dense() {
    let df = featured_frame(
        "Transaction Date,Agency Name,Vendor,Amount\n\
         2024-01-01,Parks Board,Green Supplies,10.00\n\
         2024-01-02,Dept of Roads,Acme Paving,20.00\n\
         2024-01-03,Parks Board,Book Depot,30.00\n\
         2024-01-04,City Library,Acme Paving,40.00\n",
    );

    let agency_codes: Vec<i32> = df
        .column("AGENCY_CODE")
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    let merchant_codes: Vec<i32> = df
        .column("MERCHANT_CODE")
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect();

    // First-seen order: Parks Board=0, Dept of Roads=1, City Library=2
    assert_eq!(agency_codes, vec![0, 1, 0, 2]);
    // Green Supplies=0, Acme Paving=1, Book Depot=2
    assert_eq!(merchant_codes, vec![0, 1, 2, 1]);
}

#[test]
fn test_feature_columns_appended_in_order() {
    let df = featured_frame(
        "Transaction Date,Agency Name,Vendor,Amount\n\
         2024-01-01,Parks Board,Green Supplies,10.00\n",
    );

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "TRANSACTION_DATE",
            "AGENCY_NAME",
            "MERCHANT_NAME",
            "TRANSACTION_AMOUNT",
            "Month",
            "DayOfWeek",
            "AGENCY_CODE",
            "MERCHANT_CODE",
        ]
    );
}
