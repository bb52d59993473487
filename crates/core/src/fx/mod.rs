//! FX module - exchange-rate models, boundary traits, and the conversion
//! service producing the KRW-augmented record view.

mod errors;
mod model;
mod service;
mod store;
mod traits;


pub use errors::FxError;
pub use model::{ConvertedCost, ConvertedCostRecord, ExchangeRate, RateSource};
pub use service::{FxService, RateSummary};
pub use store::InMemoryRateStore;
pub use traits::{RateProvider, RateStore};
