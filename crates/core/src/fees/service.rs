//! Fee computation over the merged record set.

use rust_decimal::{Decimal, RoundingStrategy};

use super::model::{
    CostBase, FeeBreakdown, BASE_FEE_FLOOR, BASE_FEE_RATE, FEE_RATE, FEE_THRESHOLD,
};
use crate::ingest::BatchSource;
use crate::merge::SourcedRecord;

fn round_money(value: Decimal) -> Decimal {
    // Midpoint away from zero: 1000.0005 must round to 1000.01.
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums the merged set's primary-attributed costs, split into custom-charge
/// and cloud-usage totals. Secondary records never feed the fee base.
pub fn cost_base(records: &[SourcedRecord]) -> CostBase {
    let mut base = CostBase::default();
    for sourced in records {
        if sourced.source != BatchSource::Primary {
            continue;
        }
        if sourced.record.is_custom_charge() {
            base.custom_charge_total += sourced.record.cost;
        } else {
            base.non_custom_charge_total += sourced.record.cost;
        }
    }
    base
}

/// Computes the three-part fee over a cost base.
///
/// The rate amount and base fee are rounded to two decimals independently;
/// the usage fee is derived from the rounded components and rounded again.
/// The tier boundary is strict: a base below the threshold pays the fixed
/// fee, a base at the threshold pays the percentage.
pub fn compute_fee(base: &CostBase) -> FeeBreakdown {
    let b = base.non_custom_charge_total;
    let is_over_threshold = b >= FEE_THRESHOLD;

    let fee_rate_amount = round_money(b * FEE_RATE);
    let base_fee = if b < FEE_THRESHOLD {
        BASE_FEE_FLOOR
    } else {
        round_money(b * BASE_FEE_RATE)
    };
    let usage_fee = round_money(fee_rate_amount - base_fee);

    FeeBreakdown {
        threshold: FEE_THRESHOLD,
        is_over_threshold,
        fee_rate_amount,
        base_fee,
        usage_fee,
        custom_charge_total: base.custom_charge_total,
        non_custom_charge_total: base.non_custom_charge_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::CanonicalCostRecord;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn base(non_custom: Decimal) -> CostBase {
        CostBase {
            custom_charge_total: Decimal::ZERO,
            non_custom_charge_total: non_custom,
        }
    }

    fn sourced(source: BatchSource, service: &str, cost: Decimal) -> SourcedRecord {
        SourcedRecord {
            source,
            record: CanonicalCostRecord {
                usage_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
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
                environment: "cielmobility".to_string(),
                original_environment: None,
                cost_center: None,
                usage_type: None,
                usage_amount: None,
                usage_unit: None,
                raw_row: None,
            },
        }
    }

    #[test]
    fn test_worked_example_at_50000() {
        let fee = compute_fee(&base(dec!(50000)));

        assert!(fee.is_over_threshold);
        assert_eq!(fee.fee_rate_amount, dec!(10000.00));
        assert_eq!(fee.base_fee, dec!(2500.00));
        assert_eq!(fee.usage_fee, dec!(7500.00));
    }

    #[test]
    fn test_tier_boundary_is_strictly_below_threshold() {
        let just_under = compute_fee(&base(dec!(19999.99)));
        assert!(!just_under.is_over_threshold);
        assert_eq!(just_under.base_fee, dec!(1000.00));
        assert_eq!(just_under.fee_rate_amount, dec!(4000.00));
        assert_eq!(just_under.usage_fee, dec!(3000.00));

        let at_threshold = compute_fee(&base(dec!(20000.00)));
        assert!(at_threshold.is_over_threshold);
        assert_eq!(at_threshold.base_fee, dec!(1000.00)); // 5% of 20000

        let just_over = compute_fee(&base(dec!(20000.01)));
        assert!(just_over.is_over_threshold);
        // 1000.0005 rounds away from zero, not to even.
        assert_eq!(just_over.base_fee, dec!(1000.01));
    }

    #[test]
    fn test_usage_fee_derived_from_rounded_components() {
        // 1234.567 * 0.20 = 246.9134 -> 246.91
        // 1234.567 < threshold -> base fee 1000
        let fee = compute_fee(&base(dec!(1234.567)));
        assert_eq!(fee.fee_rate_amount, dec!(246.91));
        assert_eq!(fee.base_fee, dec!(1000));
        assert_eq!(fee.usage_fee, dec!(-753.09));
    }

    #[test]
    fn test_cost_base_splits_custom_charges_and_ignores_secondary() {
        let records = vec![
            sourced(BatchSource::Primary, "EC2", dec!(100)),
            sourced(BatchSource::Primary, "Custom Charge - support", dec!(40)),
            sourced(BatchSource::Primary, "CUSTOM CHARGE", dec!(10)),
            sourced(BatchSource::Secondary, "EC2", dec!(999)),
        ];

        let base = cost_base(&records);
        assert_eq!(base.non_custom_charge_total, dec!(100));
        assert_eq!(base.custom_charge_total, dec!(50));
    }

    #[test]
    fn test_empty_record_set_yields_floor_fee() {
        let fee = compute_fee(&cost_base(&[]));
        assert!(!fee.is_over_threshold);
        assert_eq!(fee.fee_rate_amount, dec!(0.00));
        assert_eq!(fee.base_fee, dec!(1000));
        assert_eq!(fee.usage_fee, dec!(-1000.00));
    }
}
