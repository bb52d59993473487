//! Combines the primary and secondary tenant batches into one record set.
//!
//! The exporter can legitimately emit multiple distinct line items with
//! identical displayed fields, so content-only dedup would collapse real
//! spend. The dedup key is therefore namespaced by upload source: only
//! exact duplicates from the same source collapse, which removes true
//! re-uploads while keeping same-looking records from different tenants.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use crate::constants::MERGED_PROJECT_ENVIRONMENT;
use crate::ingest::{Batch, BatchSource};
use crate::records::CanonicalCostRecord;

/// A canonical record tagged with the upload it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcedRecord {
    pub source: BatchSource,
    #[serde(flatten)]
    pub record: CanonicalCostRecord,
}

/// Result of combining the available batches.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub records: Vec<SourcedRecord>,
    /// Primary records dropped because the secondary batch is authoritative
    /// for their environment.
    pub primary_filtered: usize,
    pub duplicates_removed: usize,
}

type DedupKey = (
    NaiveDate,
    String,
    String,
    String,
    Decimal,
    BatchSource,
);

fn dedup_key(sourced: &SourcedRecord) -> DedupKey {
    let record = &sourced.record;
    (
        record.usage_date,
        record.service_name.clone(),
        record.description.clone().unwrap_or_default(),
        // Pre-alias value when the upload carried one, else the normalized
        // environment; never null so keys compare deterministically.
        record
            .original_environment
            .clone()
            .unwrap_or_else(|| record.environment.clone()),
        record.cost,
        sourced.source,
    )
}

/// Removes same-source exact duplicates, first occurrence wins. Returns the
/// surviving records and the number removed.
pub fn dedup_sourced(records: Vec<SourcedRecord>) -> (Vec<SourcedRecord>, usize) {
    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(records.len());
    let total = records.len();

    let unique: Vec<SourcedRecord> = records
        .into_iter()
        .filter(|sourced| seen.insert(dedup_key(sourced)))
        .collect();

    let removed = total - unique.len();
    (unique, removed)
}

/// Combines the available batches into the session's record set.
///
/// With both batches present: primary records whose environment is the
/// merged-project sentinel are dropped (the secondary upload is the
/// authoritative source for that project's usage), the remainder is
/// concatenated primary-first with all secondary records, and same-source
/// duplicates are removed. A single present batch passes through untouched.
pub fn combine(primary: Option<&Batch>, secondary: Option<&Batch>) -> MergeOutcome {
    match (primary, secondary) {
        (Some(primary), Some(secondary)) => {
            let mut primary_filtered = 0usize;
            let mut merged: Vec<SourcedRecord> =
                Vec::with_capacity(primary.records.len() + secondary.records.len());

            for record in &primary.records {
                if record.environment == MERGED_PROJECT_ENVIRONMENT {
                    primary_filtered += 1;
                    continue;
                }
                merged.push(SourcedRecord {
                    source: primary.source,
                    record: record.clone(),
                });
            }
            for record in &secondary.records {
                merged.push(SourcedRecord {
                    source: secondary.source,
                    record: record.clone(),
                });
            }

            let (records, duplicates_removed) = dedup_sourced(merged);
            log::info!(
                "merged batches: {} records ({} primary filtered, {} duplicates removed)",
                records.len(),
                primary_filtered,
                duplicates_removed
            );

            MergeOutcome {
                records,
                primary_filtered,
                duplicates_removed,
            }
        }
        (Some(batch), None) | (None, Some(batch)) => MergeOutcome {
            records: batch
                .records
                .iter()
                .map(|record| SourcedRecord {
                    source: batch.source,
                    record: record.clone(),
                })
                .collect(),
            primary_filtered: 0,
            duplicates_removed: 0,
        },
        (None, None) => MergeOutcome::default(),
    }
}
