//! Completion slab resolution.
//!
//! This module maps a requested completion duration to a discrete
//! completion-time slab. The calculator itself accepts a pre-resolved slab
//! key; this helper is for callers that hold a raw duration.

use rust_decimal::Decimal;

use crate::models::CompletionSlab;

/// Resolves a requested completion duration to its slab.
///
/// The duration lands in the fastest slab whose window covers it.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::resolve_slab;
/// use rate_engine::models::CompletionSlab;
/// use rust_decimal::Decimal;
///
/// assert_eq!(resolve_slab(Decimal::from(24)), CompletionSlab::Within24h);
/// assert_eq!(resolve_slab(Decimal::from(36)), CompletionSlab::Within48h);
/// assert_eq!(resolve_slab(Decimal::from(200)), CompletionSlab::Within1Week);
/// ```
pub fn resolve_slab(requested_hours: Decimal) -> CompletionSlab {
    if requested_hours <= Decimal::from(24) {
        CompletionSlab::Within24h
    } else if requested_hours <= Decimal::from(48) {
        CompletionSlab::Within48h
    } else if requested_hours <= Decimal::from(72) {
        CompletionSlab::Within72h
    } else {
        CompletionSlab::Within1Week
    }
}
