//! Configuration for the Rate Calculation Engine.
//!
//! This module contains the typed policy configuration structures and the
//! [`ConfigLoader`] that reads them from a YAML pricing directory.

mod loader;
mod types;

pub use loader::{ConfigLoader, PricingConfig};
pub use types::{
    DistanceConfig, DynamicPricingConfig, FactorConfig, PincodeTierMap, SlabEntry, SlabTable,
    TierEntry,
};
