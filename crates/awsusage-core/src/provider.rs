//! Record source trait
//!
//! This module defines the `RecordSource` trait implemented by anything that
//! can feed raw report rows into the pipeline. The report crate implements it
//! for CSV files; in-memory rows implement it for tests and benchmarks.

use crate::error::Result;
use crate::types::RawRecord;
use futures::stream::{self, Stream};
use std::pin::Pin;

/// Boxed stream of raw report rows
pub type RecordStream<'a> = Pin<Box<dyn Stream<Item = Result<RawRecord>> + Send + 'a>>;

/// Source of raw report rows.
///
/// The stream is forward-only and meant to be consumed once.
pub trait RecordSource: Send + Sync {
    /// Stream every row, in source order.
    fn load_records(&self) -> RecordStream<'_>;
}

impl RecordSource for Vec<RawRecord> {
    fn load_records(&self) -> RecordStream<'_> {
        Box::pin(stream::iter(self.iter().cloned().map(Ok)))
    }
}
