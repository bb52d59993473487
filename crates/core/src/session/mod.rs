//! Session-scoped dataset: the loaded batches and their combined view.

mod model;
mod service;


pub use model::UploadOutcome;
pub use service::CostSession;
