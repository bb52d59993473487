//! Boundary traits for rate acquisition and persistence.
//!
//! The bank/API clients and any durable store live outside the core and
//! implement these traits.

use chrono::NaiveDate;

use super::errors::FxError;
use super::model::ExchangeRate;

/// Upstream rate source.
///
/// Implementations perform network I/O with a bounded timeout. "No rate
/// published for that date" is `Ok(None)`; connectivity failure is
/// `Err(ProviderUnavailable)`. Callers treat both as "no rate available".
pub trait RateProvider: Send + Sync {
    fn fetch_rate(
        &self,
        base: &str,
        target: &str,
        as_of: NaiveDate,
    ) -> Result<Option<ExchangeRate>, FxError>;
}

/// Rate persistence.
///
/// `upsert_rate` must be an atomic insert-or-replace on
/// (base, target, date) so a concurrent caller cannot lose an update.
pub trait RateStore: Send + Sync {
    /// Exact-date lookup when `as_of` is given, otherwise the most recent
    /// rate stored for the pair.
    fn get_rate(
        &self,
        base: &str,
        target: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Option<ExchangeRate>, FxError>;

    fn upsert_rate(&self, rate: ExchangeRate) -> Result<(), FxError>;

    /// Distinct target currencies with at least one stored rate.
    fn currencies(&self) -> Result<Vec<String>, FxError>;
}
