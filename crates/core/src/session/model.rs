//! Session models.

use serde::Serialize;

use crate::ingest::{BatchSource, FileOutcome};

/// Outcome of one upload call, for the response surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub source: BatchSource,
    pub files: Vec<FileOutcome>,
    pub records_converted: usize,
    pub rows_skipped: usize,
    /// Size of the combined set after the merge recompute.
    pub combined_records: usize,
    pub primary_filtered: usize,
    pub duplicates_removed: usize,
    pub message: String,
}
