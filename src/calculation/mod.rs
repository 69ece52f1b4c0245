//! Calculation logic for the Rate Calculation Engine.
//!
//! This module contains the calculation functions for pricing a case:
//! pincode tier resolution, completion-slab resolution, the dynamic
//! quality/demand/distance composite multiplier, and the rate calculator
//! that orchestrates them into an itemized result.

mod calculator;
mod dynamic_adjustments;
mod slab_resolution;
mod tier_resolution;

pub use calculator::{RateRequest, calculate_rate};
pub use dynamic_adjustments::{DynamicAdjustment, DynamicInputs, composite_multiplier};
pub use slab_resolution::resolve_slab;
pub use tier_resolution::resolve_tier;
