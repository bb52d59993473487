//! Batch conversion service: ties the loader, column normalizer, and row
//! converter together and handles multi-file uploads.

use serde::{Deserialize, Serialize};

use super::columns::{normalize_columns, validate_required_columns};
use super::converter::{convert_table, ConversionReport, RowSkip};
use super::csv_parser::load_table;
use super::errors::IngestError;
use crate::records::CanonicalCostRecord;

/// Which tenant an upload belongs to. Used to namespace the merge dedup
/// key; conversion itself is source-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchSource {
    Primary,
    Secondary,
}

impl BatchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchSource::Primary => "primary",
            BatchSource::Secondary => "secondary",
        }
    }
}

/// Canonical records produced from one upload, plus the conversion report.
#[derive(Debug, Clone)]
pub struct Batch {
    pub source: BatchSource,
    pub records: Vec<CanonicalCostRecord>,
    pub report: ConversionReport,
}

/// One file of an upload call.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content: String,
}

/// Per-file outcome of a multi-file upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub file_name: String,
    pub accepted: bool,
    pub message: String,
    pub records: usize,
    pub rows_skipped: usize,
}

pub struct IngestService;

impl IngestService {
    /// Converts one file's raw text into a batch: tolerant load, column
    /// normalization, required-column validation, row conversion.
    pub fn convert_content(content: &str, source: BatchSource) -> Result<Batch, IngestError> {
        let table = load_table(content)?;
        let table = normalize_columns(table);
        validate_required_columns(&table)?;
        let (records, report) = convert_table(&table);
        Ok(Batch {
            source,
            records,
            report,
        })
    }

    /// Converts a group of files into one batch. A failing file is reported
    /// in its outcome and skipped without voiding the others; if every file
    /// fails, the upload as a whole is rejected.
    pub fn convert_upload(
        files: &[UploadFile],
        source: BatchSource,
    ) -> Result<(Batch, Vec<FileOutcome>), IngestError> {
        if files.is_empty() {
            return Err(IngestError::NoUsableData("no files provided".to_string()));
        }

        let mut records = Vec::new();
        let mut report = ConversionReport::default();
        let mut outcomes = Vec::with_capacity(files.len());
        let mut accepted = 0usize;

        for file in files {
            match Self::convert_content(&file.content, source) {
                Ok(batch) => {
                    accepted += 1;
                    outcomes.push(FileOutcome {
                        file_name: file.name.clone(),
                        accepted: true,
                        message: format!("{} records converted", batch.records.len()),
                        records: batch.records.len(),
                        rows_skipped: batch.report.skipped.len(),
                    });
                    // Re-base skip indexes so they stay unique across files.
                    let base = report.total_rows;
                    report
                        .skipped
                        .extend(batch.report.skipped.into_iter().map(|skip| RowSkip {
                            row_index: base + skip.row_index,
                            reason: skip.reason,
                        }));
                    report.total_rows += batch.report.total_rows;
                    records.extend(batch.records);
                }
                Err(err) => {
                    log::error!("{}: {}", file.name, err);
                    outcomes.push(FileOutcome {
                        file_name: file.name.clone(),
                        accepted: false,
                        message: err.to_string(),
                        records: 0,
                        rows_skipped: 0,
                    });
                }
            }
        }

        if accepted == 0 {
            let causes = outcomes
                .iter()
                .map(|o| format!("{}: {}", o.file_name, o.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(IngestError::NoUsableData(causes));
        }

        report.converted = records.len();
        Ok((
            Batch {
                source,
                records,
                report,
            },
            outcomes,
        ))
    }
}
