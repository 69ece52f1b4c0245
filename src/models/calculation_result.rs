//! Calculation result models for the Rate Calculation Engine.
//!
//! This module contains the [`RateCalculationResult`] type and its breakdown
//! structure. Results are ephemeral value objects produced fresh per call;
//! they carry no identity and are never persisted by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CompletionSlab, Tier};

/// The itemized breakdown behind a calculated rate.
///
/// Carries the categorical keys the calculation resolved, the literal
/// base-times-multiplier arithmetic, and one human-readable string per
/// applied adjustment, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBreakdown {
    /// The tier the pincode resolved to.
    pub pincode_tier: Tier,
    /// The completion slab the case was priced under.
    pub completion_slab: CompletionSlab,
    /// Literal "base x combined-multiplier = result" calculation string.
    pub base_calculation: String,
    /// Applied adjustments in order: quality, demand, distance, speed bonus.
    pub adjustments: Vec<String>,
}

/// The complete result of a rate calculation.
///
/// # Example
///
/// ```
/// use rate_engine::models::{CompletionSlab, RateBreakdown, RateCalculationResult, Tier};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = RateCalculationResult {
///     base_rate: Decimal::from_str("600.00").unwrap(),
///     travel_allowance: Decimal::from_str("50").unwrap(),
///     bonus: Decimal::from_str("0.00").unwrap(),
///     total_rate: Decimal::from_str("650.00").unwrap(),
///     breakdown: RateBreakdown {
///         pincode_tier: Tier::Tier1,
///         completion_slab: CompletionSlab::Within24h,
///         base_calculation: "₹500 x 1.2 = ₹600.00".to_string(),
///         adjustments: vec![],
///     },
/// };
/// assert_eq!(result.total_rate, result.base_rate + result.travel_allowance + result.bonus);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCalculationResult {
    /// The payable base after all multipliers, rounded to 2 decimal places.
    pub base_rate: Decimal,
    /// The travel allowance, passed through at source precision.
    pub travel_allowance: Decimal,
    /// The total bonus (flat row bonus plus slab percentage bonus), rounded.
    pub bonus: Decimal,
    /// The total payable amount, rounded to 2 decimal places.
    pub total_rate: Decimal,
    /// The itemized breakdown for auditability.
    pub breakdown: RateBreakdown,
}
