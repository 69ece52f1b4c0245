//! Core data models for the Rate Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod rate_card;
mod slab;
mod tier;

pub use calculation_result::{RateBreakdown, RateCalculationResult};
pub(crate) use rate_card::validate_amounts;
pub use rate_card::{NewRateCard, RateCardRow, RateCardUpdate};
pub use slab::CompletionSlab;
pub use tier::Tier;
