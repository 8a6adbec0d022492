//! Common test utilities and helpers for awsusage tests
//!
//! Report rows are written as real CSV files with the space-prefixed header
//! row AWS uses, so tests exercise the same loader as the binary.

#![allow(dead_code)]

use awsusage_core::types::{RawRecord, columns};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header row of a usage report
pub const REPORT_HEADER: &str =
    "Service, Operation, UsageType, Resource, StartTime, EndTime, UsageValue";

/// One report row
#[derive(Debug, Clone)]
pub struct Row {
    pub resource: String,
    pub usage_type: String,
    pub start: String,
    pub value: String,
}

impl Row {
    pub fn new(resource: &str, usage_type: &str, start: &str, value: &str) -> Self {
        Self {
            resource: resource.to_string(),
            usage_type: usage_type.to_string(),
            start: start.to_string(),
            value: value.to_string(),
        }
    }

    /// CSV line in report column order
    pub fn to_csv(&self) -> String {
        format!(
            "AmazonEC2,RunInstances,{},{},{},{},{}",
            self.usage_type, self.resource, self.start, self.start, self.value
        )
    }

    /// In-memory form, as the loader would produce it
    pub fn to_record(&self) -> RawRecord {
        [
            (columns::RESOURCE, self.resource.as_str()),
            (columns::USAGE_TYPE, self.usage_type.as_str()),
            (columns::START_TIME, self.start.as_str()),
            (columns::USAGE_VALUE, self.value.as_str()),
        ]
        .into_iter()
        .collect()
    }
}

/// Temporary directory holding report files
pub struct ReportDir {
    dir: TempDir,
}

impl ReportDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Write a report file and return its path
    pub fn write(&self, name: &str, rows: &[Row]) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create report");
        writeln!(file, "{REPORT_HEADER}").expect("write header");
        for row in rows {
            writeln!(file, "{}", row.to_csv()).expect("write row");
        }
        path
    }

    /// Path inside the directory that does not exist yet
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// The two-resource report used across end-to-end tests
pub fn two_resource_rows() -> Vec<Row> {
    vec![
        Row::new("i-1", "X", "01/01/20 00:00:00", "5"),
        Row::new("i-2", "X", "01/02/20 00:00:00", "10"),
    ]
}
