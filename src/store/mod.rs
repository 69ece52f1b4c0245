//! Rate policy storage for the Rate Calculation Engine.
//!
//! This module contains the [`RatePolicyStore`] that holds rate card rows,
//! the tier map, the slab table, and the cached dynamic pricing
//! configuration, plus the [`ConfigSource`] seam to durable config storage.

mod policy_store;

pub use policy_store::{ConfigSource, PricingSnapshot, RatePolicyStore, YamlConfigSource};
