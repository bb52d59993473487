//! Exchange-rate domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{BASE_CURRENCY, TARGET_CURRENCY};
use crate::records::CanonicalCostRecord;

/// Where a rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Api,
    Manual,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateSource::Api => "api",
            RateSource::Manual => "manual",
        }
    }
}

/// One quoted exchange rate.
///
/// One logical rate exists per (base, target, date); a later write with the
/// same key replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub base_currency: String,
    pub target_currency: String,
    #[serde(serialize_with = "serialize_rate_6")]
    pub rate: Decimal,
    pub rate_date: NaiveDate,
    pub source: RateSource,
    pub created_at: DateTime<Utc>,
    pub currency_code: Option<String>,
    pub currency_name: Option<String>,
}

impl ExchangeRate {
    /// A manually entered USD→KRW rate for the given date.
    pub fn manual(rate: Decimal, rate_date: NaiveDate) -> Self {
        Self {
            base_currency: BASE_CURRENCY.to_string(),
            target_currency: TARGET_CURRENCY.to_string(),
            rate,
            rate_date,
            source: RateSource::Manual,
            created_at: Utc::now(),
            currency_code: None,
            currency_name: None,
        }
    }

    /// Upsert key: one logical rate per (base, target, date).
    pub fn key(&self) -> (String, String, NaiveDate) {
        (
            self.base_currency.clone(),
            self.target_currency.clone(),
            self.rate_date,
        )
    }
}

fn serialize_rate_6<S>(decimal: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let rounded = decimal.round_dp(6);
    serializer.serialize_str(&rounded.to_string())
}

/// A single converted amount. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedCost {
    pub original_amount: Decimal,
    pub original_currency: String,
    pub converted_amount: Decimal,
    pub converted_currency: String,
    pub exchange_rate: Decimal,
    pub rate_date: NaiveDate,
}

/// A canonical record with the settlement-currency amount alongside. The
/// KRW fields stay absent when no rate is available.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedCostRecord {
    #[serde(flatten)]
    pub record: CanonicalCostRecord,
    pub cost_krw: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub exchange_date: Option<NaiveDate>,
}
