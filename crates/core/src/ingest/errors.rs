use thiserror::Error;

/// Errors raised while ingesting an exporter file.
///
/// Both variants are fatal for the file they occur in and only for that
/// file; row-level problems are reported as skips, never as errors.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The input could not be interpreted as tabular text at all.
    #[error("could not read tabular data: {0}")]
    Parse(String),

    /// Hard-required canonical columns are missing after normalization.
    #[error("missing required columns: {}", .0.join(", "))]
    Schema(Vec<String>),

    /// Every file in an upload call failed; the call as a whole is rejected.
    #[error("no file produced usable cost data ({0})")]
    NoUsableData(String),
}
