use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::{
    costs_by_environment, costs_by_environment_krw, costs_by_project, costs_by_service,
    daily_costs, daily_costs_by_environment, summary_stats, summary_stats_with_krw,
};
use crate::fx::ConvertedCostRecord;
use crate::records::CanonicalCostRecord;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(day: u32, service: &str, cost: Decimal, environment: &str) -> CanonicalCostRecord {
    CanonicalCostRecord {
        usage_date: ymd(2025, 11, day),
        account_id: "unknown".to_string(),
        account_name: None,
        service_name: service.to_string(),
        description: None,
        resource_id: None,
        region: None,
        cost,
        currency: "USD".to_string(),
        department: None,
        project: None,
        environment: environment.to_string(),
        original_environment: None,
        cost_center: None,
        usage_type: None,
        usage_amount: None,
        usage_unit: None,
        raw_row: None,
    }
}

fn converted(record: CanonicalCostRecord, rate: Option<Decimal>) -> ConvertedCostRecord {
    ConvertedCostRecord {
        cost_krw: rate.map(|r| record.cost * r),
        exchange_rate: rate,
        exchange_date: rate.map(|_| ymd(2025, 11, 24)),
        record,
    }
}

#[test]
fn test_daily_costs_sum_by_calendar_day() {
    let records = vec![
        record(1, "EC2", dec!(1.5), "cielmobility"),
        record(1, "S3", dec!(2.5), "cielmobility"),
        record(2, "EC2", dec!(3), "cielmobility"),
    ];

    let daily = daily_costs(&records);
    assert_eq!(daily[&ymd(2025, 11, 1)], dec!(4.0));
    assert_eq!(daily[&ymd(2025, 11, 2)], dec!(3));
    assert_eq!(daily.len(), 2);
}

#[test]
fn test_costs_by_service_and_environment() {
    let records = vec![
        record(1, "EC2", dec!(1), "prod"),
        record(2, "EC2", dec!(2), "dev"),
        record(3, "S3", dec!(4), "prod"),
    ];

    let by_service = costs_by_service(&records);
    assert_eq!(by_service["EC2"], dec!(3));
    assert_eq!(by_service["S3"], dec!(4));

    let by_env = costs_by_environment(&records);
    assert_eq!(by_env["prod"], dec!(5));
    assert_eq!(by_env["dev"], dec!(2));
}

#[test]
fn test_blank_environment_rolls_up_under_placeholder() {
    let records = vec![record(1, "EC2", dec!(1), "  ")];
    let by_env = costs_by_environment(&records);
    assert_eq!(by_env["Unknown"], dec!(1));
}

#[test]
fn test_project_rollup_skips_untagged_records() {
    let mut tagged = record(1, "EC2", dec!(5), "prod");
    tagged.project = Some("alpha".to_string());
    let records = vec![tagged, record(2, "EC2", dec!(7), "prod")];

    let by_project = costs_by_project(&records);
    assert_eq!(by_project.len(), 1);
    assert_eq!(by_project["alpha"], dec!(5));
}

#[test]
fn test_daily_costs_by_environment_series() {
    let records = vec![
        record(1, "EC2", dec!(1), "prod"),
        record(1, "EC2", dec!(2), "dev"),
        record(2, "EC2", dec!(3), "prod"),
    ];

    let series = daily_costs_by_environment(&records);
    assert_eq!(series["prod"][&ymd(2025, 11, 1)], dec!(1));
    assert_eq!(series["prod"][&ymd(2025, 11, 2)], dec!(3));
    assert_eq!(series["dev"].len(), 1);
}

#[test]
fn test_summary_stats_over_records() {
    let mut other_account = record(3, "S3", dec!(2), "prod");
    other_account.account_id = "ciel".to_string();
    let records = vec![
        record(1, "EC2", dec!(1), "prod"),
        record(5, "EC2", dec!(4), "prod"),
        other_account,
    ];

    let stats = summary_stats(&records);
    assert_eq!(stats.total_records, 3);
    assert_eq!(stats.total_cost, dec!(7));
    assert_eq!(stats.unique_accounts, 2);
    assert_eq!(stats.unique_services, 2);

    let range = stats.date_range.unwrap();
    assert_eq!(range.start, ymd(2025, 11, 1));
    assert_eq!(range.end, ymd(2025, 11, 5));
}

#[test]
fn test_summary_stats_of_empty_set() {
    let stats = summary_stats(&[]);
    assert_eq!(stats.total_records, 0);
    assert_eq!(stats.total_cost, dec!(0));
    assert!(stats.date_range.is_none());
    assert!(stats.cost_by_service.is_empty());
}

#[test]
fn test_krw_rollups_cover_converted_records_only() {
    let rate = Some(dec!(1000));
    let records = vec![
        converted(record(1, "EC2", dec!(2), "prod"), rate),
        converted(record(2, "EC2", dec!(3), "prod"), None),
    ];

    let stats = summary_stats_with_krw(&records);
    assert_eq!(stats.base.total_cost, dec!(5));
    assert_eq!(stats.total_cost_krw, Some(dec!(2000)));
    assert_eq!(stats.cost_by_service_krw["EC2"], dec!(2000));
    assert_eq!(stats.average_exchange_rate, Some(dec!(1000)));
}

#[test]
fn test_krw_environment_rollup_uses_canonical_default_for_blank() {
    let records = vec![converted(record(1, "EC2", dec!(2), ""), Some(dec!(1000)))];
    let by_env = costs_by_environment_krw(&records);
    assert_eq!(by_env["cielmobility"], dec!(2000));
}

#[test]
fn test_krw_stats_absent_without_any_conversion() {
    let records = vec![converted(record(1, "EC2", dec!(2), "prod"), None)];
    let stats = summary_stats_with_krw(&records);
    assert_eq!(stats.total_cost_krw, None);
    assert!(stats.cost_by_service_krw.is_empty());
    assert_eq!(stats.average_exchange_rate, None);
}
