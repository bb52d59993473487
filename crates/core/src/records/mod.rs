//! Canonical cost records - the normalized schema every exporter row is
//! converted into, plus the filter used by the query layer.

mod filter;
mod model;

#[cfg(test)]
mod model_tests;

pub use filter::{filter_records, RecordFilter};
pub use model::CanonicalCostRecord;
