//! Two-source merge with source-namespaced deduplication.

mod service;


pub use service::{combine, dedup_sourced, MergeOutcome, SourcedRecord};
