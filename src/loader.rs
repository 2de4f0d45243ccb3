//! Bucket file loading.
//!
//! A bucket file is JSON: either a bare array of buckets or an object with a
//! `buckets` array. Entries that do not describe a bucket are skipped with a
//! warning so one bad record does not hide the rest of the series.

use serde_json::Value;
use std::path::Path;
use thiserror::Error;

use crate::state::RawBucket;

/// Errors that can occur while loading a bucket file
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the file
    #[error("Failed to read bucket file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON
    #[error("Failed to parse bucket file: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON without a bucket list
    #[error("Expected an array of buckets or an object with a \"buckets\" array")]
    UnexpectedShape,
}

/// Read and decode a bucket file
pub fn load_buckets(path: impl AsRef<Path>) -> Result<Vec<RawBucket>, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let buckets = parse_buckets(&content)?;
    tracing::info!("Loaded {} buckets from {}", buckets.len(), path.display());
    Ok(buckets)
}

/// Decode bucket JSON from a string
pub fn parse_buckets(content: &str) -> Result<Vec<RawBucket>, LoadError> {
    let entries = match serde_json::from_str::<Value>(content)? {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("buckets") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(LoadError::UnexpectedShape),
        },
        _ => return Err(LoadError::UnexpectedShape),
    };

    let mut buckets = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawBucket>(entry) {
            Ok(bucket) => buckets.push(bucket),
            Err(e) => tracing::warn!("Skipping malformed bucket #{}: {}", i, e),
        }
    }
    Ok(buckets)
}
