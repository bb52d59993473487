//! Canonical cost record domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_ENVIRONMENT;

/// One normalized line-item of cloud spend.
///
/// Invariants upheld by the converter:
/// - `usage_date` always parsed; rows without a parseable date never become
///   records.
/// - `cost` is non-negative; garbled currency text cleans to zero.
/// - `environment` is never blank; it defaults to the canonical sentinel.
/// - `original_environment` holds the tag value as uploaded, before alias
///   normalization, and is never rewritten afterwards.
///
/// `raw_row` is a diagnostics-only snapshot of the source row. It is excluded
/// from every serialized view, so serializing a record produces its export
/// view directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalCostRecord {
    pub usage_date: NaiveDate,
    pub account_id: String,
    pub account_name: Option<String>,

    pub service_name: String,
    pub description: Option<String>,
    pub resource_id: Option<String>,
    pub region: Option<String>,

    pub cost: Decimal,
    pub currency: String,

    pub department: Option<String>,
    pub project: Option<String>,
    pub environment: String,
    pub original_environment: Option<String>,
    pub cost_center: Option<String>,

    pub usage_type: Option<String>,
    pub usage_amount: Option<Decimal>,
    pub usage_unit: Option<String>,

    #[serde(skip_serializing, default)]
    pub raw_row: Option<Value>,
}

impl CanonicalCostRecord {
    /// Whether this line item is an MSP pass-through charge rather than
    /// cloud usage. Excluded from the fee calculation base.
    pub fn is_custom_charge(&self) -> bool {
        self.service_name.to_lowercase().contains("custom charge")
    }

    /// Environment key for rollups. Falls back to the canonical default so
    /// grouped views never carry a blank key.
    pub fn environment_key(&self) -> &str {
        if self.environment.trim().is_empty() {
            DEFAULT_ENVIRONMENT
        } else {
            &self.environment
        }
    }
}
