//! End-to-end tests for the attrikpi binary

use assert_cmd::Command;
use polars::prelude::*;
use predicates::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_missing_dataset_fails() {
    Command::cargo_bin("attrikpi")
        .unwrap()
        .args(["-i", "/definitely/not/here.csv", "--format", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load dataset"));
}

#[test]
fn test_schema_error_fails_without_output() {
    let mut df = df! {
        "Age" => [30i64, 40],
    }
    .unwrap();
    let (_dir, path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("attrikpi")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "--format", "json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("required attrition column absent"));
}

#[test]
fn test_json_output() {
    let mut df = common::create_hr_dataframe();
    let (_dir, path) = common::create_temp_csv(&mut df);

    let output = Command::cargo_bin("attrikpi")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "--format", "json", "--no-heatmap"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["charts"].as_array().unwrap().len(), 3);
}

#[test]
fn test_terminal_output() {
    let mut df = common::create_hr_dataframe();
    let (_dir, path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("attrikpi")
        .unwrap()
        .args(["-i", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("DASHBOARD SUMMARY"))
        .stdout(predicate::str::contains("EducationField"));
}

#[test]
fn test_columns_subcommand() {
    let mut df = common::create_hr_dataframe();
    let (_dir, path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("attrikpi")
        .unwrap()
        .args(["columns", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("YearsAtCompany"));
}
