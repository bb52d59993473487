//! Fee calculation models and formula constants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Monthly cost-base threshold separating the fixed base fee from the
/// percentage base fee.
pub const FEE_THRESHOLD: Decimal = dec!(20000);

/// Invoice-side rate applied to the whole cost base.
pub const FEE_RATE: Decimal = dec!(0.20);

/// Base-fee rate applied at or above the threshold.
pub const BASE_FEE_RATE: Decimal = dec!(0.05);

/// Fixed base fee below the threshold.
pub const BASE_FEE_FLOOR: Decimal = dec!(1000);

/// Cost base the fee formula runs on, split by charge kind. Only the
/// non-custom-charge total feeds the formula.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBase {
    pub custom_charge_total: Decimal,
    pub non_custom_charge_total: Decimal,
}

/// Three-part MSP fee over a cost base, each component rounded to two
/// decimal places.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub threshold: Decimal,
    pub is_over_threshold: bool,
    pub fee_rate_amount: Decimal,
    pub base_fee: Decimal,
    pub usage_fee: Decimal,
    pub custom_charge_total: Decimal,
    pub non_custom_charge_total: Decimal,
}
