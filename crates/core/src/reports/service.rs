//! Pure grouping and summation over canonical record sets.
//!
//! All rollups are BTreeMap-keyed so iteration order is deterministic for
//! the reporting layer. Group keys are never null or blank: blank
//! environments fall back to a placeholder.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use super::model::{DateRange, SummaryStats, SummaryStatsWithKrw};
use crate::constants::UNKNOWN_GROUP;
use crate::fx::ConvertedCostRecord;
use crate::records::CanonicalCostRecord;

fn raw_environment_key(record: &CanonicalCostRecord) -> String {
    let env = record.environment.trim();
    if env.is_empty() {
        UNKNOWN_GROUP.to_string()
    } else {
        env.to_string()
    }
}

/// Total cost per calendar day.
pub fn daily_costs(records: &[CanonicalCostRecord]) -> BTreeMap<NaiveDate, Decimal> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.usage_date).or_insert(Decimal::ZERO) += record.cost;
    }
    totals
}

/// Total cost per service.
pub fn costs_by_service(records: &[CanonicalCostRecord]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals
            .entry(record.service_name.clone())
            .or_insert(Decimal::ZERO) += record.cost;
    }
    totals
}

/// Total cost per environment, with a placeholder for blank keys.
pub fn costs_by_environment(records: &[CanonicalCostRecord]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals
            .entry(raw_environment_key(record))
            .or_insert(Decimal::ZERO) += record.cost;
    }
    totals
}

/// Total cost per project, over the records carrying a project tag.
pub fn costs_by_project(records: &[CanonicalCostRecord]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for record in records {
        if let Some(project) = &record.project {
            *totals.entry(project.clone()).or_insert(Decimal::ZERO) += record.cost;
        }
    }
    totals
}

/// Per-environment daily cost series.
pub fn daily_costs_by_environment(
    records: &[CanonicalCostRecord],
) -> BTreeMap<String, BTreeMap<NaiveDate, Decimal>> {
    let mut series: BTreeMap<String, BTreeMap<NaiveDate, Decimal>> = BTreeMap::new();
    for record in records {
        *series
            .entry(raw_environment_key(record))
            .or_default()
            .entry(record.usage_date)
            .or_insert(Decimal::ZERO) += record.cost;
    }
    series
}

/// Summary statistics over a record set.
pub fn summary_stats(records: &[CanonicalCostRecord]) -> SummaryStats {
    let mut accounts: HashSet<&str> = HashSet::new();
    let mut total_cost = Decimal::ZERO;
    let mut start: Option<NaiveDate> = None;
    let mut end: Option<NaiveDate> = None;

    for record in records {
        accounts.insert(record.account_id.as_str());
        total_cost += record.cost;
        start = Some(start.map_or(record.usage_date, |d| d.min(record.usage_date)));
        end = Some(end.map_or(record.usage_date, |d| d.max(record.usage_date)));
    }

    let cost_by_service = costs_by_service(records);

    SummaryStats {
        total_records: records.len(),
        total_cost,
        date_range: start
            .zip(end)
            .map(|(start, end)| DateRange { start, end }),
        unique_accounts: accounts.len(),
        unique_services: cost_by_service.len(),
        cost_by_service,
    }
}

/// Total settlement-currency cost per service, over records that carry a
/// converted amount.
pub fn costs_by_service_krw(records: &[ConvertedCostRecord]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for converted in records {
        if let Some(krw) = converted.cost_krw {
            *totals
                .entry(converted.record.service_name.clone())
                .or_insert(Decimal::ZERO) += krw;
        }
    }
    totals
}

/// Total settlement-currency cost per environment. Blank environments fall
/// back to the canonical default rather than the raw placeholder.
pub fn costs_by_environment_krw(records: &[ConvertedCostRecord]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for converted in records {
        if let Some(krw) = converted.cost_krw {
            *totals
                .entry(converted.record.environment_key().to_string())
                .or_insert(Decimal::ZERO) += krw;
        }
    }
    totals
}

/// Summary statistics with the settlement-currency totals alongside.
pub fn summary_stats_with_krw(records: &[ConvertedCostRecord]) -> SummaryStatsWithKrw {
    let base_records: Vec<CanonicalCostRecord> =
        records.iter().map(|c| c.record.clone()).collect();
    let base = summary_stats(&base_records);

    let mut total_cost_krw = None;
    let mut rate_sum = Decimal::ZERO;
    let mut rate_count = 0u32;

    for converted in records {
        if let Some(krw) = converted.cost_krw {
            *total_cost_krw.get_or_insert(Decimal::ZERO) += krw;
        }
        if let Some(rate) = converted.exchange_rate {
            rate_sum += rate;
            rate_count += 1;
        }
    }

    SummaryStatsWithKrw {
        base,
        total_cost_krw,
        cost_by_service_krw: costs_by_service_krw(records),
        average_exchange_rate: (rate_count > 0).then(|| rate_sum / Decimal::from(rate_count)),
    }
}
