//! Pincode tier model.
//!
//! This module defines the geographic tier classification that a postal
//! code resolves to, which drives the tier multiplier on the payable rate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Geographic classification of a postal code.
///
/// Tiers are checked in declaration order during classification, and an
/// unclassified pincode falls back to [`Tier::Tier2`].
///
/// # Example
///
/// ```
/// use rate_engine::models::Tier;
///
/// assert_eq!(Tier::default(), Tier::Tier2);
/// assert_eq!(Tier::Tier1.to_string(), "tier_1");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    /// Metro locations.
    #[serde(rename = "tier_1")]
    Tier1,
    /// City locations. The fallback tier for unclassified pincodes.
    #[default]
    #[serde(rename = "tier_2")]
    Tier2,
    /// Rural locations.
    #[serde(rename = "tier_3")]
    Tier3,
}

impl Tier {
    /// All tiers in classification order.
    pub const ALL: [Tier; 3] = [Tier::Tier1, Tier::Tier2, Tier::Tier3];

    /// Returns the snake_case key for this tier (e.g. "tier_1").
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Tier1 => "tier_1",
            Tier::Tier2 => "tier_2",
            Tier::Tier3 => "tier_3",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
