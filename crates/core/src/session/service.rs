//! The session object owning the current dataset.
//!
//! Each operation takes the session explicitly and runs to completion;
//! there is no shared global state. Loading a batch replaces any earlier
//! upload from the same source and recomputes the combined set, so records
//! never outlive the upload that produced them.

use super::model::UploadOutcome;
use crate::errors::Result;
use crate::fees::{compute_fee, cost_base, FeeBreakdown};
use crate::fx::{ConvertedCostRecord, FxService};
use crate::ingest::{Batch, BatchSource, IngestService, UploadFile};
use crate::merge::{combine, MergeOutcome, SourcedRecord};
use crate::records::{CanonicalCostRecord, RecordFilter};
use crate::reports::{summary_stats, summary_stats_with_krw, SummaryStats, SummaryStatsWithKrw};

#[derive(Default)]
pub struct CostSession {
    primary: Option<Batch>,
    secondary: Option<Batch>,
    combined: MergeOutcome,
}

impl CostSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts an upload and installs it as the batch for its source,
    /// replacing any previous upload from that source, then recomputes the
    /// combined set. A rejected upload leaves the session untouched.
    pub fn load_batch(
        &mut self,
        source: BatchSource,
        files: &[UploadFile],
    ) -> Result<UploadOutcome> {
        let (batch, file_outcomes) = IngestService::convert_upload(files, source)?;
        let records_converted = batch.records.len();
        let rows_skipped = batch.report.skipped.len();
        let accepted_files = file_outcomes.iter().filter(|f| f.accepted).count();

        match source {
            BatchSource::Primary => self.primary = Some(batch),
            BatchSource::Secondary => self.secondary = Some(batch),
        }
        self.recompute();

        let mut message = format!(
            "{} file(s), {} records loaded",
            accepted_files, records_converted
        );
        if self.combined.duplicates_removed > 0 {
            message.push_str(&format!(
                " ({} duplicates removed)",
                self.combined.duplicates_removed
            ));
        }

        Ok(UploadOutcome {
            source,
            files: file_outcomes,
            records_converted,
            rows_skipped,
            combined_records: self.combined.records.len(),
            primary_filtered: self.combined.primary_filtered,
            duplicates_removed: self.combined.duplicates_removed,
            message,
        })
    }

    fn recompute(&mut self) {
        self.combined = combine(self.primary.as_ref(), self.secondary.as_ref());
    }

    /// Drops all loaded batches; a new settlement period starts clean.
    pub fn clear(&mut self) {
        self.primary = None;
        self.secondary = None;
        self.combined = MergeOutcome::default();
    }

    pub fn primary(&self) -> Option<&Batch> {
        self.primary.as_ref()
    }

    pub fn secondary(&self) -> Option<&Batch> {
        self.secondary.as_ref()
    }

    /// The combined, deduplicated record set with its merge bookkeeping.
    pub fn combined(&self) -> &MergeOutcome {
        &self.combined
    }

    pub fn sourced_records(&self) -> &[SourcedRecord] {
        &self.combined.records
    }

    pub fn is_empty(&self) -> bool {
        self.combined.records.is_empty()
    }

    /// The combined records without their source tags, as consumed by the
    /// reporting and export layers.
    pub fn records(&self) -> Vec<CanonicalCostRecord> {
        self.combined
            .records
            .iter()
            .map(|s| s.record.clone())
            .collect()
    }

    /// Records matching a query filter.
    pub fn query(&self, filter: &RecordFilter) -> Vec<CanonicalCostRecord> {
        self.combined
            .records
            .iter()
            .map(|s| &s.record)
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> SummaryStats {
        summary_stats(&self.records())
    }

    /// The MSP fee over the current combined set.
    pub fn fee_report(&self) -> FeeBreakdown {
        compute_fee(&cost_base(&self.combined.records))
    }

    /// KRW-augmented view of the combined set. Recomputed on demand, so it
    /// reflects whatever rate the store currently holds.
    pub fn krw_view(&self, fx: &FxService) -> Vec<ConvertedCostRecord> {
        fx.augment_records(&self.records())
    }

    pub fn summary_with_krw(&self, fx: &FxService) -> SummaryStatsWithKrw {
        summary_stats_with_krw(&self.krw_view(fx))
    }
}
