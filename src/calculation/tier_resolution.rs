//! Pincode tier resolution.
//!
//! This module classifies a postal code into a geographic tier by linear
//! membership test against the configured tier map.

use crate::config::PincodeTierMap;
use crate::models::Tier;

/// Resolves a postal code to its geographic tier.
///
/// Tiers are checked in tier_1, tier_2, tier_3 order; the first membership
/// match wins. A code absent from every list resolves to the default tier
/// (tier_2) silently: pricing must never fail merely because a pincode is
/// unclassified. The engine does not validate the code's format.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::resolve_tier;
/// use rate_engine::config::PincodeTierMap;
/// use rate_engine::models::Tier;
///
/// let mut map = PincodeTierMap::default();
/// map.tier_1.pincodes.push("110001".to_string());
///
/// assert_eq!(resolve_tier("110001", &map), Tier::Tier1);
/// assert_eq!(resolve_tier("999999", &map), Tier::Tier2);
/// ```
pub fn resolve_tier(postal_code: &str, tier_map: &PincodeTierMap) -> Tier {
    for tier in Tier::ALL {
        if tier_map
            .entry(tier)
            .pincodes
            .iter()
            .any(|p| p == postal_code)
        {
            return tier;
        }
    }
    Tier::default()
}
