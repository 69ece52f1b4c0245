//! Dynamic pricing adjustments.
//!
//! This module computes the composite multiplier from the optional
//! quality, demand, and distance signals on a calculation. Each applicable
//! factor adds a weighted bonus term to a multiplier starting at 1.0; the
//! terms are additive bonuses, never multiplicative discounts.

use rust_decimal::Decimal;

use crate::config::DynamicPricingConfig;

/// The optional dynamic signals supplied with a calculation.
///
/// A missing signal means "factor not applicable" and contributes nothing;
/// it is never treated as zero. Values are not range-validated: a quality
/// score outside [0, 1] passes through unchecked, which is a documented
/// contract precondition on the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicInputs {
    /// Worker quality score, nominally in [0, 1].
    pub quality_score: Option<Decimal>,
    /// Market demand level, nominally in [0, 1].
    pub demand_level: Option<Decimal>,
    /// Travel distance to the case, in kilometres.
    pub distance_km: Option<Decimal>,
}

/// The composite multiplier and its human-readable adjustment strings.
#[derive(Debug, Clone)]
pub struct DynamicAdjustment {
    /// The composite multiplier to apply to the running rate.
    pub multiplier: Decimal,
    /// One string per applied term, in quality, demand, distance order.
    pub adjustments: Vec<String>,
}

/// Computes the composite dynamic pricing multiplier.
///
/// Starting at 1.0, each supplied factor that passes its gate adds a
/// weighted term:
/// - quality and demand add `(value - threshold) * weight` when the value
///   is at or above the threshold; below-threshold values contribute
///   nothing (no penalty);
/// - distance adds `(1 - distance / max_km) * weight` when the distance is
///   within the cap, decreasing linearly to zero at the cap; beyond the
///   cap nothing applies (never negative).
///
/// With dynamic pricing disabled, the multiplier is 1.0 and no
/// adjustments are recorded.
pub fn composite_multiplier(
    inputs: &DynamicInputs,
    config: &DynamicPricingConfig,
) -> DynamicAdjustment {
    let mut multiplier = Decimal::ONE;
    let mut adjustments = Vec::new();

    if !config.enabled {
        return DynamicAdjustment {
            multiplier,
            adjustments,
        };
    }

    if let Some(score) = inputs.quality_score {
        if score >= config.quality.threshold {
            let term = (score - config.quality.threshold) * config.quality.weight;
            multiplier += term;
            adjustments.push(format!(
                "Quality bonus +{} (score {} >= threshold {})",
                term.normalize(),
                score.normalize(),
                config.quality.threshold.normalize()
            ));
        }
    }

    if let Some(level) = inputs.demand_level {
        if level >= config.demand.threshold {
            let term = (level - config.demand.threshold) * config.demand.weight;
            multiplier += term;
            adjustments.push(format!(
                "Demand bonus +{} (level {} >= threshold {})",
                term.normalize(),
                level.normalize(),
                config.demand.threshold.normalize()
            ));
        }
    }

    if let Some(distance) = inputs.distance_km {
        if config.distance.max_km > Decimal::ZERO && distance <= config.distance.max_km {
            let term = (Decimal::ONE - distance / config.distance.max_km) * config.distance.weight;
            multiplier += term;
            adjustments.push(format!(
                "Distance bonus +{} ({} km of max {} km)",
                term.normalize(),
                distance.normalize(),
                config.distance.max_km.normalize()
            ));
        }
    }

    DynamicAdjustment {
        multiplier,
        adjustments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> DynamicPricingConfig {
        DynamicPricingConfig::default()
    }

    #[test]
    fn test_no_inputs_is_identity() {
        let result = composite_multiplier(&DynamicInputs::default(), &config());

        assert_eq!(result.multiplier, Decimal::ONE);
        assert!(result.adjustments.is_empty());
    }

    #[test]
    fn test_disabled_config_ignores_all_inputs() {
        let mut cfg = config();
        cfg.enabled = false;
        let inputs = DynamicInputs {
            quality_score: Some(dec("0.95")),
            demand_level: Some(dec("0.9")),
            distance_km: Some(dec("10")),
        };

        let result = composite_multiplier(&inputs, &cfg);

        assert_eq!(result.multiplier, Decimal::ONE);
        assert!(result.adjustments.is_empty());
    }

    #[test]
    fn test_quality_above_threshold_adds_weighted_term() {
        // (0.95 - 0.85) * 0.4 = 0.04
        let inputs = DynamicInputs {
            quality_score: Some(dec("0.95")),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &config());

        assert_eq!(result.multiplier, dec("1.04"));
        assert_eq!(result.adjustments.len(), 1);
        assert!(result.adjustments[0].contains("Quality bonus +0.04"));
        assert!(result.adjustments[0].contains("0.95"));
        assert!(result.adjustments[0].contains("0.85"));
    }

    #[test]
    fn test_quality_below_threshold_contributes_nothing() {
        let inputs = DynamicInputs {
            quality_score: Some(dec("0.80")),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &config());

        assert_eq!(result.multiplier, Decimal::ONE);
        assert!(result.adjustments.is_empty());
    }

    #[test]
    fn test_quality_at_threshold_adds_zero_term() {
        let inputs = DynamicInputs {
            quality_score: Some(dec("0.85")),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &config());

        assert_eq!(result.multiplier, Decimal::ONE);
        assert_eq!(result.adjustments.len(), 1);
    }

    #[test]
    fn test_demand_above_threshold_adds_weighted_term() {
        // (0.9 - 0.8) * 0.3 = 0.03
        let inputs = DynamicInputs {
            demand_level: Some(dec("0.9")),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &config());

        assert_eq!(result.multiplier, dec("1.03"));
        assert!(result.adjustments[0].contains("Demand bonus +0.03"));
    }

    #[test]
    fn test_distance_within_cap_adds_linear_term() {
        // (1 - 10/50) * 0.3 = 0.24
        let inputs = DynamicInputs {
            distance_km: Some(dec("10")),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &config());

        assert_eq!(result.multiplier, dec("1.24"));
        assert!(result.adjustments[0].contains("Distance bonus +0.24"));
    }

    #[test]
    fn test_distance_at_cap_adds_zero_term() {
        let inputs = DynamicInputs {
            distance_km: Some(dec("50")),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &config());

        assert_eq!(result.multiplier, Decimal::ONE);
    }

    #[test]
    fn test_distance_just_below_cap_is_strictly_positive() {
        let inputs = DynamicInputs {
            distance_km: Some(dec("49.9")),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &config());

        assert!(result.multiplier > Decimal::ONE);
    }

    #[test]
    fn test_distance_beyond_cap_contributes_nothing() {
        let inputs = DynamicInputs {
            distance_km: Some(dec("80")),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &config());

        assert_eq!(result.multiplier, Decimal::ONE);
        assert!(result.adjustments.is_empty());
    }

    #[test]
    fn test_zero_distance_cap_never_divides() {
        let mut cfg = config();
        cfg.distance.max_km = Decimal::ZERO;
        let inputs = DynamicInputs {
            distance_km: Some(Decimal::ZERO),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &cfg);
        assert_eq!(result.multiplier, Decimal::ONE);
    }

    #[test]
    fn test_all_factors_compose_additively() {
        // 1 + 0.04 + 0.03 + 0.24 = 1.31
        let inputs = DynamicInputs {
            quality_score: Some(dec("0.95")),
            demand_level: Some(dec("0.9")),
            distance_km: Some(dec("10")),
        };

        let result = composite_multiplier(&inputs, &config());

        assert_eq!(result.multiplier, dec("1.31"));
        assert_eq!(result.adjustments.len(), 3);
    }

    #[test]
    fn test_adjustments_recorded_in_quality_demand_distance_order() {
        let inputs = DynamicInputs {
            quality_score: Some(dec("0.95")),
            demand_level: Some(dec("0.9")),
            distance_km: Some(dec("10")),
        };

        let result = composite_multiplier(&inputs, &config());

        assert!(result.adjustments[0].starts_with("Quality"));
        assert!(result.adjustments[1].starts_with("Demand"));
        assert!(result.adjustments[2].starts_with("Distance"));
    }

    #[test]
    fn test_out_of_range_quality_passes_through_unchecked() {
        // Range validation is a caller precondition, not an engine check.
        let inputs = DynamicInputs {
            quality_score: Some(dec("1.5")),
            ..Default::default()
        };

        let result = composite_multiplier(&inputs, &config());

        // (1.5 - 0.85) * 0.4 = 0.26
        assert_eq!(result.multiplier, dec("1.26"));
    }
}
