//! Report data loader
//!
//! Reads AWS usage reports (CSV with a header row) and streams their rows
//! as [`RawRecord`]s. Files are read in the order given and rows keep their
//! file order; nothing is deduplicated across files.

use awsusage_core::error::{AwsUsageError, Result};
use awsusage_core::provider::{RecordSource, RecordStream};
use awsusage_core::types::{RawRecord, columns};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Data loader for AWS usage report files.
#[derive(Debug, Clone)]
pub struct ReportLoader {
    paths: Vec<PathBuf>,
}

impl ReportLoader {
    /// Create a loader over one or more report paths
    ///
    /// # Errors
    ///
    /// Returns an error if no path is given
    pub fn new(paths: Vec<PathBuf>) -> Result<Self> {
        if paths.is_empty() {
            return Err(AwsUsageError::InvalidArgument(
                "at least one report file is required".into(),
            ));
        }
        Ok(Self { paths })
    }

    /// Report paths in load order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl RecordSource for ReportLoader {
    fn load_records(&self) -> RecordStream<'_> {
        Box::pin(async_stream::stream! {
            for path in &self.paths {
                match read_report(path).await {
                    Ok(rows) => {
                        debug!("Loaded {} rows from {}", rows.len(), path.display());
                        for row in rows {
                            yield Ok(row);
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

async fn read_report(path: &Path) -> Result<Vec<RawRecord>> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|source| AwsUsageError::ReadReport {
            path: path.to_path_buf(),
            source,
        })?;
    parse_report(path, content.as_slice())
}

/// Parse one report; headers are kept verbatim, leading spaces included
fn parse_report<R: Read>(path: &Path, reader: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| format_error(path, e))?
        .clone();
    ensure_required_columns(path, &headers)?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<HashMap<String, String>>() {
        let fields = result.map_err(|e| format_error(path, e))?;
        rows.push(RawRecord::new(fields));
    }

    Ok(rows)
}

fn ensure_required_columns(path: &Path, headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<String> = columns::REQUIRED
        .into_iter()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .map(|column| format!("'{column}'"))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AwsUsageError::MissingColumns {
            file: path.to_path_buf(),
            columns: missing,
        })
    }
}

fn format_error(path: &Path, error: csv::Error) -> AwsUsageError {
    AwsUsageError::Format {
        file: path.to_path_buf(),
        error: error.to_string(),
    }
}
