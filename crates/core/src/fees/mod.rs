//! Tiered MSP service-fee calculation.

mod model;
mod service;

pub use model::{
    CostBase, FeeBreakdown, BASE_FEE_FLOOR, BASE_FEE_RATE, FEE_RATE, FEE_THRESHOLD,
};
pub use service::{compute_fee, cost_base};
