//! Integration tests for the tax-report CLI.
//!
//! These tests run the actual binary and verify the JSON report it emits.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given arguments and return stdout parsed as JSON
fn run_report(args: &[&str]) -> Value {
    let mut cmd = Command::cargo_bin("tax-report").unwrap();
    let assert = cmd.args(args).assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

#[test]
fn test_basic_report_matches_worked_example() {
    let json = run_report(&[&test_data_path("sales_basic.csv")]);

    let stats = &json["statistics"];
    assert_eq!(stats["count"], 2);
    assert_eq!(stats["sumBase"], "150.00");
    assert_eq!(stats["sumAdjusted"], "178.50");
    assert_eq!(stats["average"], "75.00");
    assert_eq!(stats["min"], "50.00");
    assert_eq!(stats["max"], "100.00");
    assert_eq!(stats["taxCollected"], "28.50");

    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "A");
    assert_eq!(records[0]["baseAmount"], "100.00");
    assert_eq!(records[0]["adjustedAmount"], "119.00");
    assert_eq!(records[1]["id"], "B");
    assert_eq!(records[1]["adjustedAmount"], "59.50");
}

#[test]
fn test_metadata_defaults() {
    let input = test_data_path("sales_basic.csv");
    let json = run_report(&[&input]);

    assert_eq!(json["metadata"]["sourceLabel"], input.as_str());
    assert_eq!(json["metadata"]["rateApplied"], "0.19");
    assert_eq!(
        json["metadata"]["generatedAt"],
        json["statistics"]["generatedAt"]
    );
}

#[test]
fn test_custom_rate_and_label() {
    let json = run_report(&[
        &test_data_path("sales_basic.csv"),
        "--rate",
        "0.5",
        "--label",
        "Q2 sales",
    ]);

    assert_eq!(json["metadata"]["sourceLabel"], "Q2 sales");
    assert_eq!(json["metadata"]["rateApplied"], "0.5");
    assert_eq!(json["records"][0]["adjustedAmount"], "150.00");
    assert_eq!(json["statistics"]["sumAdjusted"], "225.00");
}

#[test]
fn test_defective_rows_are_dropped_not_fatal() {
    let json = run_report(&[&test_data_path("sales_defects.csv")]);

    // 5 data rows, 2 defective (one shape, one conversion)
    assert_eq!(json["statistics"]["count"], 3);
    let ids: Vec<&str> = json["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["V-1", "V-3", "V-4"]);
}

#[test]
fn test_empty_input_yields_zero_state() {
    let json = run_report(&[&test_data_path("sales_empty.csv")]);

    let stats = &json["statistics"];
    assert_eq!(stats["count"], 0);
    assert_eq!(stats["sumBase"], "0.00");
    assert_eq!(stats["sumAdjusted"], "0.00");
    assert_eq!(stats["average"], "0.00");
    assert_eq!(stats["min"], "0.00");
    assert_eq!(stats["max"], "0.00");
    assert_eq!(stats["taxCollected"], "0.00");
    assert!(json["records"].as_array().unwrap().is_empty());
}

#[test]
fn test_no_header_flag() {
    let json = run_report(&[&test_data_path("sales_no_header.csv"), "--no-header"]);
    assert_eq!(json["statistics"]["count"], 2);
    assert_eq!(json["statistics"]["sumBase"], "150.00");
}

#[test]
fn test_negative_rate_is_accepted() {
    let json = run_report(&[&test_data_path("sales_basic.csv"), "--rate", "-0.1"]);
    assert_eq!(json["records"][0]["adjustedAmount"], "90.00");
    assert_eq!(json["statistics"]["taxCollected"], "-15.00");
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("report.json");

    let mut cmd = Command::cargo_bin("tax-report").unwrap();
    cmd.arg(test_data_path("sales_basic.csv"))
        .arg("--output")
        .arg(&out_path)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json["statistics"]["count"], 2);
}

#[test]
fn test_summary_goes_to_stderr() {
    let mut cmd = Command::cargo_bin("tax-report").unwrap();
    cmd.arg(test_data_path("sales_basic.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("TAX REPORT SUMMARY"))
        .stderr(predicate::str::contains("Records processed:   2"))
        .stderr(predicate::str::contains("28.50"));
}

#[test]
fn test_identical_runs_differ_only_in_timestamp() {
    let input = test_data_path("sales_basic.csv");
    let mut first = run_report(&[&input]);
    let mut second = run_report(&[&input]);

    for json in [&mut first, &mut second] {
        json["metadata"]["generatedAt"] = Value::Null;
        json["statistics"]["generatedAt"] = Value::Null;
    }
    assert_eq!(first, second);
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("tax-report").unwrap();
    cmd.arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("tax-report").unwrap();
    cmd.assert().failure();
}
