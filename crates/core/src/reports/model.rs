//! Reporting models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Inclusive usage-date span of a record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Summary statistics over a record set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_records: usize,
    pub total_cost: Decimal,
    pub date_range: Option<DateRange>,
    pub unique_accounts: usize,
    pub unique_services: usize,
    pub cost_by_service: BTreeMap<String, Decimal>,
}

/// Summary statistics with the settlement-currency totals alongside. The
/// KRW fields stay absent when no record carried a converted amount.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatsWithKrw {
    #[serde(flatten)]
    pub base: SummaryStats,
    pub total_cost_krw: Option<Decimal>,
    pub cost_by_service_krw: BTreeMap<String, Decimal>,
    pub average_exchange_rate: Option<Decimal>,
}
