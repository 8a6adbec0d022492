//! Shared test utilities for unit tests
//!
//! Integration tests (in tests/) cannot access this module because it's
//! marked with #[cfg(test)]. They have their own copy in tests/common/mod.rs.

use crate::types::{RawRecord, TimedRecord, columns, parse_start_time};

/// Build a report row with the four required columns
pub fn raw_record(resource: &str, usage_type: &str, start: &str, value: &str) -> RawRecord {
    [
        (columns::RESOURCE, resource),
        (columns::USAGE_TYPE, usage_type),
        (columns::START_TIME, start),
        (columns::USAGE_VALUE, value),
    ]
    .into_iter()
    .collect()
}

/// Build a row and attach its parsed start time
pub fn timed_record(resource: &str, usage_type: &str, start: &str, value: &str) -> TimedRecord {
    TimedRecord {
        start: parse_start_time(start).expect("valid test timestamp"),
        record: raw_record(resource, usage_type, start, value),
    }
}
