//! In-memory rate store for session-scoped use.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use super::errors::FxError;
use super::model::ExchangeRate;
use super::traits::RateStore;

/// Session-scoped store. The write lock makes the insert-or-replace on
/// (base, target, date) atomic with respect to concurrent readers.
#[derive(Default)]
pub struct InMemoryRateStore {
    rates: RwLock<HashMap<(String, String, NaiveDate), ExchangeRate>>,
}

impl InMemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateStore for InMemoryRateStore {
    fn get_rate(
        &self,
        base: &str,
        target: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Option<ExchangeRate>, FxError> {
        let rates = self
            .rates
            .read()
            .map_err(|e| FxError::StoreError(e.to_string()))?;

        match as_of {
            Some(date) => Ok(rates
                .get(&(base.to_string(), target.to_string(), date))
                .cloned()),
            None => Ok(rates
                .values()
                .filter(|r| r.base_currency == base && r.target_currency == target)
                .max_by_key(|r| (r.rate_date, r.created_at))
                .cloned()),
        }
    }

    fn upsert_rate(&self, rate: ExchangeRate) -> Result<(), FxError> {
        let mut rates = self
            .rates
            .write()
            .map_err(|e| FxError::StoreError(e.to_string()))?;
        rates.insert(rate.key(), rate);
        Ok(())
    }

    fn currencies(&self) -> Result<Vec<String>, FxError> {
        let rates = self
            .rates
            .read()
            .map_err(|e| FxError::StoreError(e.to_string()))?;
        let mut currencies: Vec<String> =
            rates.values().map(|r| r.target_currency.clone()).collect();
        currencies.sort();
        currencies.dedup();
        Ok(currencies)
    }
}
