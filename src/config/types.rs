//! Configuration types for rate policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML policy files: the pincode tier map, the
//! completion-slab table, and the dynamic pricing configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CompletionSlab, Tier};

fn default_multiplier() -> Decimal {
    Decimal::ONE
}

fn default_enabled() -> bool {
    true
}

/// One tier's pincode membership and rate multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierEntry {
    /// The pincodes classified into this tier.
    #[serde(default)]
    pub pincodes: Vec<String>,
    /// Multiplier applied to the base rate for cases in this tier.
    #[serde(default = "default_multiplier")]
    pub multiplier: Decimal,
}

impl Default for TierEntry {
    fn default() -> Self {
        Self {
            pincodes: Vec::new(),
            multiplier: Decimal::ONE,
        }
    }
}

/// The ordered tier-to-pincode associations.
///
/// Classification checks tiers in tier_1, tier_2, tier_3 order; the first
/// membership match wins. Pincodes absent from every list resolve to the
/// default tier (tier_2).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PincodeTierMap {
    /// Metro pincodes.
    #[serde(default)]
    pub tier_1: TierEntry,
    /// City pincodes.
    #[serde(default)]
    pub tier_2: TierEntry,
    /// Rural pincodes.
    #[serde(default)]
    pub tier_3: TierEntry,
}

impl PincodeTierMap {
    /// Returns the entry for the given tier.
    pub fn entry(&self, tier: Tier) -> &TierEntry {
        match tier {
            Tier::Tier1 => &self.tier_1,
            Tier::Tier2 => &self.tier_2,
            Tier::Tier3 => &self.tier_3,
        }
    }

    /// Returns the configured rate multiplier for the given tier.
    pub fn multiplier(&self, tier: Tier) -> Decimal {
        self.entry(tier).multiplier
    }
}

/// One completion slab's speed multiplier and bonus percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabEntry {
    /// Multiplier applied to the running rate for this slab.
    pub multiplier: Decimal,
    /// Fraction of the final rate paid as a speed bonus (e.g. 0.10 for 10%).
    #[serde(default)]
    pub bonus_percentage: Decimal,
}

/// The completion-slab pricing table.
///
/// The table is total: every slab has an entry, so slab lookup cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabTable {
    /// Pricing for the within_24h slab.
    pub within_24h: SlabEntry,
    /// Pricing for the within_48h slab.
    pub within_48h: SlabEntry,
    /// Pricing for the within_72h slab.
    pub within_72h: SlabEntry,
    /// Pricing for the within_1w slab.
    pub within_1w: SlabEntry,
}

impl SlabTable {
    /// Returns the entry for the given slab.
    pub fn entry(&self, slab: CompletionSlab) -> &SlabEntry {
        match slab {
            CompletionSlab::Within24h => &self.within_24h,
            CompletionSlab::Within48h => &self.within_48h,
            CompletionSlab::Within72h => &self.within_72h,
            CompletionSlab::Within1Week => &self.within_1w,
        }
    }
}

impl Default for SlabTable {
    fn default() -> Self {
        Self {
            within_24h: SlabEntry {
                multiplier: Decimal::new(12, 1),
                bonus_percentage: Decimal::new(10, 2),
            },
            within_48h: SlabEntry {
                multiplier: Decimal::new(11, 1),
                bonus_percentage: Decimal::new(5, 2),
            },
            within_72h: SlabEntry {
                multiplier: Decimal::ONE,
                bonus_percentage: Decimal::ZERO,
            },
            within_1w: SlabEntry {
                multiplier: Decimal::ONE,
                bonus_percentage: Decimal::ZERO,
            },
        }
    }
}

/// Weight and threshold for a score-driven adjustment factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorConfig {
    /// Weight of this factor in the composite multiplier (0-1).
    pub weight: Decimal,
    /// Scores at or above this threshold contribute a bonus term.
    pub threshold: Decimal,
}

/// Weight and distance cap for the distance adjustment factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceConfig {
    /// Weight of the distance factor in the composite multiplier (0-1).
    pub weight: Decimal,
    /// Distances beyond this cap contribute nothing.
    pub max_km: Decimal,
}

/// Process-wide dynamic pricing configuration.
///
/// Replaced whole on update, never field-merged, so readers always observe
/// a consistent set of weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicPricingConfig {
    /// Whether dynamic adjustments are applied at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Worker quality score factor.
    pub quality: FactorConfig,
    /// Market demand level factor.
    pub demand: FactorConfig,
    /// Travel distance factor.
    pub distance: DistanceConfig,
}

impl Default for DynamicPricingConfig {
    /// The hard-coded fallback used when configuration storage is
    /// unreachable: quality 0.4/0.85, demand 0.3/0.8, distance 0.3/50 km.
    fn default() -> Self {
        Self {
            enabled: true,
            quality: FactorConfig {
                weight: Decimal::new(4, 1),
                threshold: Decimal::new(85, 2),
            },
            demand: FactorConfig {
                weight: Decimal::new(3, 1),
                threshold: Decimal::new(8, 1),
            },
            distance: DistanceConfig {
                weight: Decimal::new(3, 1),
                max_km: Decimal::from(50),
            },
        }
    }
}
