//! Exchange-rate service: lookup with fallback, manual entry, conversion,
//! and the KRW-augmented record view.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::errors::FxError;
use super::model::{ConvertedCost, ConvertedCostRecord, ExchangeRate};
use super::traits::{RateProvider, RateStore};
use crate::constants::{BASE_CURRENCY, TARGET_CURRENCY};
use crate::records::CanonicalCostRecord;

/// Rate-store summary for the settings surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSummary {
    pub latest_rate: Option<Decimal>,
    pub latest_rate_date: Option<NaiveDate>,
    pub currencies: Vec<String>,
    pub provider_configured: bool,
}

#[derive(Clone)]
pub struct FxService {
    store: Arc<dyn RateStore>,
    provider: Option<Arc<dyn RateProvider>>,
    auto_fetch: bool,
}

impl FxService {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self {
            store,
            provider: None,
            auto_fetch: false,
        }
    }

    /// Attaches an upstream provider consulted on store misses.
    pub fn with_provider(mut self, provider: Arc<dyn RateProvider>) -> Self {
        self.provider = Some(provider);
        self.auto_fetch = true;
        self
    }

    /// Resolves a rate: exact date from the store, then the provider (when
    /// configured), then the most recent stored rate. A provider failure
    /// degrades to "no rate"; it never corrupts already-held records.
    pub fn resolve_rate(
        &self,
        base: &str,
        target: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Option<ExchangeRate>, FxError> {
        let Some(date) = as_of else {
            return self.store.get_rate(base, target, None);
        };

        if let Some(rate) = self.store.get_rate(base, target, Some(date))? {
            return Ok(Some(rate));
        }

        if self.auto_fetch {
            if let Some(provider) = &self.provider {
                match provider.fetch_rate(base, target, date) {
                    Ok(Some(rate)) => {
                        self.store.upsert_rate(rate.clone())?;
                        return Ok(Some(rate));
                    }
                    Ok(None) => {}
                    Err(e) => {
                        log::warn!(
                            "rate provider failed for {}/{} on {}: {}",
                            base,
                            target,
                            date,
                            e
                        );
                    }
                }
            }
        }

        // Fall back to the most recent stored rate.
        self.store.get_rate(base, target, None)
    }

    /// Stores a manually entered USD→KRW rate, replacing any rate already
    /// stored for the same date.
    pub fn add_manual_rate(
        &self,
        rate: Decimal,
        rate_date: NaiveDate,
    ) -> Result<ExchangeRate, FxError> {
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!(
                "rate must be positive, got {rate}"
            )));
        }
        let rate = ExchangeRate::manual(rate, rate_date);
        self.store.upsert_rate(rate.clone())?;
        Ok(rate)
    }

    /// Converts an amount between currencies. Same-currency conversion is
    /// the identity with rate 1.
    pub fn convert_cost(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<ConvertedCost, FxError> {
        if from == to {
            return Ok(ConvertedCost {
                original_amount: amount,
                original_currency: from.to_string(),
                converted_amount: amount,
                converted_currency: to.to_string(),
                exchange_rate: Decimal::ONE,
                rate_date: as_of.unwrap_or_else(|| Utc::now().date_naive()),
            });
        }

        let rate = self
            .resolve_rate(from, to, as_of)?
            .ok_or_else(|| FxError::RateNotFound(from.to_string(), to.to_string()))?;

        Ok(ConvertedCost {
            original_amount: amount,
            original_currency: from.to_string(),
            converted_amount: amount * rate.rate,
            converted_currency: to.to_string(),
            exchange_rate: rate.rate,
            rate_date: rate.rate_date,
        })
    }

    /// KRW-augmented view of a record set using the most recent stored
    /// rate. Degrades to absent KRW fields when no rate is available.
    pub fn augment_records(&self, records: &[CanonicalCostRecord]) -> Vec<ConvertedCostRecord> {
        let rate = match self.resolve_rate(BASE_CURRENCY, TARGET_CURRENCY, None) {
            Ok(rate) => rate,
            Err(e) => {
                log::warn!("rate lookup failed, KRW view degraded: {}", e);
                None
            }
        };

        records
            .iter()
            .map(|record| match &rate {
                Some(rate) if record.currency == rate.base_currency => ConvertedCostRecord {
                    record: record.clone(),
                    cost_krw: Some(record.cost * rate.rate),
                    exchange_rate: Some(rate.rate),
                    exchange_date: Some(rate.rate_date),
                },
                _ => ConvertedCostRecord {
                    record: record.clone(),
                    cost_krw: None,
                    exchange_rate: None,
                    exchange_date: None,
                },
            })
            .collect()
    }

    /// Store summary for the settings surface.
    pub fn rate_summary(&self) -> Result<RateSummary, FxError> {
        let latest = self.store.get_rate(BASE_CURRENCY, TARGET_CURRENCY, None)?;
        Ok(RateSummary {
            latest_rate: latest.as_ref().map(|r| r.rate),
            latest_rate_date: latest.as_ref().map(|r| r.rate_date),
            currencies: self.store.currencies()?,
            provider_configured: self.provider.is_some(),
        })
    }
}
