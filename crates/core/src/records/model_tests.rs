use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

use super::{filter_records, CanonicalCostRecord, RecordFilter};

fn sample_record() -> CanonicalCostRecord {
    CanonicalCostRecord {
        usage_date: NaiveDate::from_ymd_opt(2025, 11, 19).unwrap(),
        account_id: "ciel".to_string(),
        account_name: Some("Ciel Account".to_string()),
        service_name: "EC2".to_string(),
        description: Some("On Demand RHEL c6i.2xlarge Instance Hour".to_string()),
        resource_id: None,
        region: Some("ap-northeast-2".to_string()),
        cost: dec!(23.96),
        currency: "USD".to_string(),
        department: None,
        project: Some("smartmobility".to_string()),
        environment: "smartmobility".to_string(),
        original_environment: Some("prd-smartmobility".to_string()),
        cost_center: None,
        usage_type: Some("BoxUsage:c6i.2xlarge".to_string()),
        usage_amount: Some(dec!(24)),
        usage_unit: Some("Hour".to_string()),
        raw_row: Some(json!({"Date": "2025-11-19", "Service": "EC2"})),
    }
}

#[test]
fn test_export_view_round_trip_preserves_all_but_raw_row() {
    let record = sample_record();

    let exported = serde_json::to_string(&record).unwrap();
    let restored: CanonicalCostRecord = serde_json::from_str(&exported).unwrap();

    let mut expected = record;
    expected.raw_row = None;
    assert_eq!(restored, expected);
}

#[test]
fn test_export_view_excludes_raw_row_field() {
    let record = sample_record();
    let exported = serde_json::to_value(&record).unwrap();

    assert!(exported.get("rawRow").is_none());
    assert!(exported.get("raw_row").is_none());
    assert_eq!(exported["serviceName"], "EC2");
}

#[test]
fn test_is_custom_charge_is_case_insensitive() {
    let mut record = sample_record();
    assert!(!record.is_custom_charge());

    record.service_name = "Custom Charge - support".to_string();
    assert!(record.is_custom_charge());

    record.service_name = "CUSTOM CHARGE".to_string();
    assert!(record.is_custom_charge());
}

#[test]
fn test_filter_by_service_and_date_range() {
    let mut other = sample_record();
    other.service_name = "FSx".to_string();
    other.usage_date = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();

    let records = vec![sample_record(), other];

    let filter = RecordFilter {
        services: Some(vec!["ec2".to_string()]),
        ..Default::default()
    };
    let hits = filter_records(&records, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].service_name, "EC2");

    let filter = RecordFilter {
        date_start: Some(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()),
        date_end: Some(NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()),
        ..Default::default()
    };
    let hits = filter_records(&records, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].service_name, "FSx");
}

#[test]
fn test_filter_by_project_requires_tag() {
    let mut untagged = sample_record();
    untagged.project = None;

    let records = vec![sample_record(), untagged];
    let filter = RecordFilter {
        project: Some("smartmobility".to_string()),
        ..Default::default()
    };

    assert_eq!(filter_records(&records, &filter).len(), 1);
}
