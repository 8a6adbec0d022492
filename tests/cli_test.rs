//! Tests for the awsusage binary's exit code contract

mod common;

use common::{ReportDir, two_resource_rows};
use std::process::Command;

fn awsusage() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_awsusage"));
    cmd.env_remove("AWSUSAGE_USAGE_TYPE")
        .env_remove("AWSUSAGE_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_data_exits_one_with_message() {
    let reports = ReportDir::new();
    let path = reports.write("usage.csv", &two_resource_rows());

    let output = awsusage().arg(&path).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No data in specified period."
    );
}

#[test]
fn test_html_output_exits_zero() {
    let reports = ReportDir::new();
    let path = reports.write("usage.csv", &two_resource_rows());
    let out = reports.path("chart.html");

    let output = awsusage()
        .args(["-t", "X", "-b", "-a", "-o"])
        .arg(&out)
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("i-1 [5]"));
}

#[test]
fn test_usage_type_from_env() {
    let reports = ReportDir::new();
    let path = reports.write("usage.csv", &two_resource_rows());
    let out = reports.path("chart.html");

    let output = awsusage()
        .env("AWSUSAGE_USAGE_TYPE", "X")
        .env("AWSUSAGE_OUTPUT", &out)
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    assert!(out.exists());
}

#[test]
fn test_errors_exit_one() {
    let reports = ReportDir::new();

    let output = awsusage()
        .arg(reports.path("missing.csv"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.csv"));

    let path = reports.write("usage.csv", &two_resource_rows());
    let output = awsusage()
        .args(["-s", "20-02-01", "-e", "20-01-01"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be before"));
}

#[test]
fn test_missing_reports_is_a_usage_error() {
    let output = awsusage().output().unwrap();
    assert!(!output.status.success());
}
