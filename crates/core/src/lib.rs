//! Costbook Core - cost-record ingestion, merge, fees, and reporting.
//!
//! This crate contains the core business logic for Costbook. It is
//! transport- and storage-agnostic: file upload handling, HTTP routes,
//! spreadsheet export, and rate-provider clients live outside and talk to
//! this crate through the traits and models defined here.

pub mod constants;
pub mod errors;
pub mod fees;
pub mod fx;
pub mod ingest;
pub mod merge;
pub mod records;
pub mod reports;
pub mod session;

// Re-export the canonical record types
pub use records::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
