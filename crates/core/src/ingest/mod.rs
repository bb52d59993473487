//! Upload ingestion: tolerant CSV loading, column normalization, and
//! row-to-record conversion.

mod columns;
mod converter;
mod csv_parser;
mod errors;
mod service;



pub use columns::{
    canonical_column_name, normalize_columns, validate_required_columns, COLUMN_ALIASES,
    REQUIRED_COLUMNS,
};
pub use converter::{
    clean_cost_value, convert_table, parse_usage_date, region_from_description, ConversionReport,
    RowConverter, RowSkip, SkipReason, DATE_FORMATS, REGION_LABELS,
};
pub use csv_parser::{load_table, RawTable, SUMMARY_MARKERS};
pub use errors::IngestError;
pub use service::{Batch, BatchSource, FileOutcome, IngestService, UploadFile};
