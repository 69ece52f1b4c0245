//! The rate calculator.
//!
//! This module orchestrates tier resolution, rate card lookup, multiplier
//! application, and dynamic adjustments into a single itemized
//! [`RateCalculationResult`]. Each calculation runs against a
//! [`PricingSnapshot`] and is all-or-nothing: any failure aborts with no
//! partial result.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{CompletionSlab, RateBreakdown, RateCalculationResult};
use crate::store::PricingSnapshot;

use super::dynamic_adjustments::{DynamicInputs, composite_multiplier};
use super::tier_resolution::resolve_tier;

/// A single case's rate calculation inputs.
#[derive(Debug, Clone)]
pub struct RateRequest {
    /// The case's postal code.
    pub postal_code: String,
    /// The pre-resolved completion slab.
    pub slab: CompletionSlab,
    /// Client scope for rate card lookup, if any.
    pub client_id: Option<String>,
    /// Overrides the rate card's base rate when present.
    pub base_rate_override: Option<Decimal>,
    /// Worker quality score, nominally in [0, 1].
    pub quality_score: Option<Decimal>,
    /// Market demand level, nominally in [0, 1].
    pub demand_level: Option<Decimal>,
    /// Travel distance to the case, in kilometres.
    pub distance_km: Option<Decimal>,
}

/// Rounds a currency amount to 2 decimal places with a fixed scale.
fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// Calculates the payable rate for a single case.
///
/// The steps run strictly in sequence, multiplying a running rate: the
/// base rate (or caller override), the tier multiplier, the slab speed
/// multiplier, then the composite dynamic multiplier. Travel allowance is
/// added flat; the bonus is the rate card's flat bonus plus the slab's
/// percentage of the final rate. Rate, bonus, and total are rounded to 2
/// decimal places; travel allowance passes through at source precision.
///
/// # Errors
///
/// Returns `PolicyNotFound` when no active rate card covers the resolved
/// (tier, slab, client) key. The tier itself never fails: unclassified
/// pincodes silently fall back to tier_2.
///
/// # Example
///
/// ```no_run
/// use rate_engine::calculation::{RateRequest, calculate_rate};
/// use rate_engine::models::CompletionSlab;
/// use rate_engine::store::RatePolicyStore;
///
/// let store = RatePolicyStore::from_config_dir("./config/pricing").unwrap();
/// let request = RateRequest {
///     postal_code: "110001".to_string(),
///     slab: CompletionSlab::Within24h,
///     client_id: None,
///     base_rate_override: None,
///     quality_score: None,
///     demand_level: None,
///     distance_km: None,
/// };
/// let result = calculate_rate(&request, &store.snapshot()).unwrap();
/// println!("payable: {}", result.total_rate);
/// ```
pub fn calculate_rate(
    request: &RateRequest,
    snapshot: &PricingSnapshot,
) -> EngineResult<RateCalculationResult> {
    let tier = resolve_tier(&request.postal_code, &snapshot.tier_map);
    let row = snapshot.find_active_row(tier, request.slab, request.client_id.as_deref())?;

    let starting_base = request.base_rate_override.unwrap_or(row.base_rate);
    let tier_multiplier = snapshot.tier_map.multiplier(tier);
    let slab_entry = snapshot.slab_table.entry(request.slab);

    let mut rate = starting_base;
    rate *= tier_multiplier;
    rate *= slab_entry.multiplier;

    let dynamic = composite_multiplier(
        &DynamicInputs {
            quality_score: request.quality_score,
            demand_level: request.demand_level,
            distance_km: request.distance_km,
        },
        &snapshot.dynamic,
    );
    rate *= dynamic.multiplier;

    let travel_allowance = row.travel_allowance;

    let mut adjustments = dynamic.adjustments;
    let slab_bonus = rate * slab_entry.bonus_percentage;
    let bonus = row.bonus + slab_bonus;
    if slab_entry.bonus_percentage > Decimal::ZERO {
        adjustments.push(format!(
            "Speed bonus {}% of rate = ₹{}",
            (slab_entry.bonus_percentage * Decimal::ONE_HUNDRED).normalize(),
            round_currency(slab_bonus)
        ));
    }

    let total = rate + travel_allowance + bonus;

    let combined = tier_multiplier * slab_entry.multiplier * dynamic.multiplier;
    let rounded_rate = round_currency(rate);
    let base_calculation = format!(
        "₹{} x {} = ₹{}",
        starting_base.normalize(),
        combined.normalize(),
        rounded_rate
    );

    Ok(RateCalculationResult {
        base_rate: rounded_rate,
        travel_allowance,
        bonus: round_currency(bonus),
        total_rate: round_currency(total),
        breakdown: RateBreakdown {
            pincode_tier: tier,
            completion_slab: request.slab,
            base_calculation,
            adjustments,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::sync::Arc;

    use crate::config::{DynamicPricingConfig, PincodeTierMap, SlabEntry, SlabTable};
    use crate::error::EngineError;
    use crate::models::{NewRateCard, RateCardRow, Tier};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn seed_row(
        tier: Tier,
        slab: CompletionSlab,
        client: Option<&str>,
        base_rate: &str,
        travel: &str,
        bonus: &str,
    ) -> RateCardRow {
        NewRateCard {
            tier,
            slab,
            client_id: client.map(str::to_string),
            base_rate: dec(base_rate),
            travel_allowance: dec(travel),
            bonus: dec(bonus),
            created_by: "test".to_string(),
        }
        .into_row()
    }

    /// Snapshot matching the canonical pricing scenarios: tier multiplier
    /// 1.0, within_24h multiplier 1.2 with no slab bonus.
    fn create_test_snapshot() -> PricingSnapshot {
        let mut tier_map = PincodeTierMap::default();
        tier_map.tier_1.pincodes = vec!["110001".to_string()];
        tier_map.tier_3.pincodes = vec!["799001".to_string()];

        let slab_table = SlabTable {
            within_24h: SlabEntry {
                multiplier: dec("1.2"),
                bonus_percentage: Decimal::ZERO,
            },
            within_48h: SlabEntry {
                multiplier: dec("1.1"),
                bonus_percentage: dec("0.05"),
            },
            within_72h: SlabEntry {
                multiplier: Decimal::ONE,
                bonus_percentage: Decimal::ZERO,
            },
            within_1w: SlabEntry {
                multiplier: Decimal::ONE,
                bonus_percentage: Decimal::ZERO,
            },
        };

        let rows = vec![
            seed_row(Tier::Tier1, CompletionSlab::Within24h, None, "500", "50", "0"),
            seed_row(
                Tier::Tier1,
                CompletionSlab::Within24h,
                Some("client_acme"),
                "550",
                "50",
                "0",
            ),
            seed_row(Tier::Tier1, CompletionSlab::Within48h, None, "500", "50", "20"),
            seed_row(Tier::Tier2, CompletionSlab::Within24h, None, "450", "40", "0"),
        ];

        PricingSnapshot {
            tier_map: Arc::new(tier_map),
            slab_table: Arc::new(slab_table),
            rows: Arc::new(rows),
            dynamic: Arc::new(DynamicPricingConfig::default()),
        }
    }

    fn base_request() -> RateRequest {
        RateRequest {
            postal_code: "110001".to_string(),
            slab: CompletionSlab::Within24h,
            client_id: None,
            base_rate_override: None,
            quality_score: None,
            demand_level: None,
            distance_km: None,
        }
    }

    #[test]
    fn test_tier_1_within_24h_without_dynamic_inputs() {
        let snapshot = create_test_snapshot();

        let result = calculate_rate(&base_request(), &snapshot).unwrap();

        assert_eq!(result.base_rate, dec("600.00"));
        assert_eq!(result.travel_allowance, dec("50"));
        assert_eq!(result.bonus, dec("0.00"));
        assert_eq!(result.total_rate, dec("650.00"));
        assert_eq!(result.breakdown.pincode_tier, Tier::Tier1);
        assert_eq!(result.breakdown.completion_slab, CompletionSlab::Within24h);
        assert!(result.breakdown.adjustments.is_empty());
    }

    #[test]
    fn test_quality_score_above_threshold() {
        // Composite multiplier 1 + (0.95 - 0.85) * 0.4 = 1.04
        let snapshot = create_test_snapshot();
        let mut request = base_request();
        request.quality_score = Some(dec("0.95"));

        let result = calculate_rate(&request, &snapshot).unwrap();

        assert_eq!(result.base_rate, dec("624.00"));
        assert_eq!(result.total_rate, dec("674.00"));
        assert_eq!(result.breakdown.adjustments.len(), 1);
        assert!(result.breakdown.adjustments[0].starts_with("Quality"));
    }

    #[test]
    fn test_base_calculation_string_is_literal() {
        let snapshot = create_test_snapshot();

        let result = calculate_rate(&base_request(), &snapshot).unwrap();
        assert_eq!(result.breakdown.base_calculation, "₹500 x 1.2 = ₹600.00");

        let mut request = base_request();
        request.quality_score = Some(dec("0.95"));
        let result = calculate_rate(&request, &snapshot).unwrap();
        assert_eq!(result.breakdown.base_calculation, "₹500 x 1.248 = ₹624.00");
    }

    #[test]
    fn test_missing_row_is_policy_not_found() {
        let snapshot = create_test_snapshot();
        let request = RateRequest {
            postal_code: "799001".to_string(),
            slab: CompletionSlab::Within1Week,
            ..base_request()
        };

        let result = calculate_rate(&request, &snapshot);

        match result {
            Err(EngineError::PolicyNotFound { tier, slab, .. }) => {
                assert_eq!(tier, Tier::Tier3);
                assert_eq!(slab, CompletionSlab::Within1Week);
            }
            other => panic!("Expected PolicyNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unlisted_pincode_priced_as_tier_2() {
        let snapshot = create_test_snapshot();
        let request = RateRequest {
            postal_code: "999999".to_string(),
            ..base_request()
        };

        let result = calculate_rate(&request, &snapshot).unwrap();

        // tier_2 row: base 450 * 1.2 = 540, travel 40
        assert_eq!(result.breakdown.pincode_tier, Tier::Tier2);
        assert_eq!(result.base_rate, dec("540.00"));
        assert_eq!(result.total_rate, dec("580.00"));
    }

    #[test]
    fn test_base_rate_override_replaces_row_rate() {
        let snapshot = create_test_snapshot();
        let mut request = base_request();
        request.base_rate_override = Some(dec("800"));

        let result = calculate_rate(&request, &snapshot).unwrap();

        assert_eq!(result.base_rate, dec("960.00"));
        assert!(result.breakdown.base_calculation.starts_with("₹800"));
    }

    #[test]
    fn test_tier_multiplier_applies_before_slab_multiplier() {
        let mut snapshot = create_test_snapshot();
        let mut tier_map = (*snapshot.tier_map).clone();
        tier_map.tier_1.multiplier = dec("1.1");
        snapshot.tier_map = Arc::new(tier_map);

        let result = calculate_rate(&base_request(), &snapshot).unwrap();

        // 500 * 1.1 * 1.2 = 660
        assert_eq!(result.base_rate, dec("660.00"));
        assert_eq!(result.breakdown.base_calculation, "₹500 x 1.32 = ₹660.00");
    }

    #[test]
    fn test_slab_bonus_percentage_added_to_flat_bonus() {
        let snapshot = create_test_snapshot();
        let request = RateRequest {
            slab: CompletionSlab::Within48h,
            ..base_request()
        };

        let result = calculate_rate(&request, &snapshot).unwrap();

        // rate 500 * 1.1 = 550; bonus 20 + 550 * 0.05 = 47.50
        assert_eq!(result.base_rate, dec("550.00"));
        assert_eq!(result.bonus, dec("47.50"));
        assert_eq!(result.total_rate, dec("647.50"));
        assert_eq!(result.breakdown.adjustments.len(), 1);
        assert!(result.breakdown.adjustments[0].starts_with("Speed bonus 5%"));
    }

    #[test]
    fn test_travel_allowance_never_multiplied() {
        let snapshot = create_test_snapshot();
        let mut request = base_request();
        request.quality_score = Some(dec("0.95"));
        request.demand_level = Some(dec("0.9"));
        request.distance_km = Some(dec("10"));

        let result = calculate_rate(&request, &snapshot).unwrap();

        assert_eq!(result.travel_allowance, dec("50"));
    }

    #[test]
    fn test_dynamic_adjustment_precedes_speed_bonus_in_breakdown() {
        let snapshot = create_test_snapshot();
        let request = RateRequest {
            slab: CompletionSlab::Within48h,
            quality_score: Some(dec("0.95")),
            ..base_request()
        };

        let result = calculate_rate(&request, &snapshot).unwrap();

        assert_eq!(result.breakdown.adjustments.len(), 2);
        assert!(result.breakdown.adjustments[0].starts_with("Quality"));
        assert!(result.breakdown.adjustments[1].starts_with("Speed bonus"));
    }

    #[test]
    fn test_missing_inputs_equal_disabled_dynamic_pricing() {
        let enabled = create_test_snapshot();
        let mut disabled = create_test_snapshot();
        let mut config = (*disabled.dynamic).clone();
        config.enabled = false;
        disabled.dynamic = Arc::new(config);

        let with_enabled = calculate_rate(&base_request(), &enabled).unwrap();
        let with_disabled = calculate_rate(&base_request(), &disabled).unwrap();

        assert_eq!(with_enabled, with_disabled);
    }

    #[test]
    fn test_identical_inputs_yield_identical_results() {
        let snapshot = create_test_snapshot();
        let mut request = base_request();
        request.quality_score = Some(dec("0.95"));
        request.distance_km = Some(dec("12.5"));

        let first = calculate_rate(&request, &snapshot).unwrap();
        let second = calculate_rate(&request, &snapshot).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_client_specific_row_wins_over_global() {
        let snapshot = create_test_snapshot();
        let mut request = base_request();
        request.client_id = Some("client_acme".to_string());

        let result = calculate_rate(&request, &snapshot).unwrap();

        // client row base 550 * 1.2 = 660
        assert_eq!(result.base_rate, dec("660.00"));
    }

    #[test]
    fn test_unknown_client_falls_back_to_global_row() {
        let snapshot = create_test_snapshot();
        let mut request = base_request();
        request.client_id = Some("client_other".to_string());

        let result = calculate_rate(&request, &snapshot).unwrap();

        assert_eq!(result.base_rate, dec("600.00"));
    }

    #[test]
    fn test_rounding_to_currency_precision() {
        let mut snapshot = create_test_snapshot();
        let mut rows = (*snapshot.rows).clone();
        rows.push(seed_row(
            Tier::Tier2,
            CompletionSlab::Within72h,
            None,
            "333.33",
            "0",
            "0",
        ));
        snapshot.rows = Arc::new(rows);

        let request = RateRequest {
            postal_code: "999999".to_string(),
            slab: CompletionSlab::Within72h,
            quality_score: Some(dec("0.95")),
            ..base_request()
        };

        let result = calculate_rate(&request, &snapshot).unwrap();

        // 333.33 * 1.04 = 346.6632, rounds to 346.66
        assert_eq!(result.base_rate, dec("346.66"));
        assert_eq!(result.total_rate, dec("346.66"));
    }

    #[test]
    fn test_quality_monotonicity_above_threshold() {
        let snapshot = create_test_snapshot();
        let mut previous = Decimal::ZERO;

        for score in ["0.85", "0.88", "0.91", "0.95", "1.0"] {
            let mut request = base_request();
            request.quality_score = Some(dec(score));
            let result = calculate_rate(&request, &snapshot).unwrap();
            assert!(
                result.total_rate >= previous,
                "total decreased at score {}",
                score
            );
            previous = result.total_rate;
        }
    }
}
