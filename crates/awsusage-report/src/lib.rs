//! AWS usage report loader for awsusage
//!
//! This crate implements the record source trait for the CSV usage
//! reports downloaded from the AWS billing console.

pub mod data_loader;

pub use data_loader::ReportLoader;
