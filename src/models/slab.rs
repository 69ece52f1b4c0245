//! Completion slab model.
//!
//! This module defines the discrete completion-time buckets that a case's
//! requested turnaround resolves to. Each slab carries a configured speed
//! multiplier and bonus percentage (see the slab table in the config module).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A discrete bucket of how quickly a case must be completed.
///
/// Slabs are totally ordered by urgency: `Within24h` is the most urgent.
/// Business policy expects faster slabs to carry a speed multiplier greater
/// than or equal to slower slabs', but this is not structurally enforced.
///
/// # Example
///
/// ```
/// use rate_engine::models::CompletionSlab;
///
/// assert!(CompletionSlab::Within24h < CompletionSlab::Within1Week);
/// assert_eq!(CompletionSlab::Within1Week.to_string(), "within_1w");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompletionSlab {
    /// Completion required within 24 hours.
    #[serde(rename = "within_24h")]
    Within24h,
    /// Completion required within 48 hours.
    #[serde(rename = "within_48h")]
    Within48h,
    /// Completion required within 72 hours.
    #[serde(rename = "within_72h")]
    Within72h,
    /// Completion required within one week.
    #[serde(rename = "within_1w")]
    Within1Week,
}

impl CompletionSlab {
    /// All slabs in urgency order, fastest first.
    pub const ALL: [CompletionSlab; 4] = [
        CompletionSlab::Within24h,
        CompletionSlab::Within48h,
        CompletionSlab::Within72h,
        CompletionSlab::Within1Week,
    ];

    /// Returns the snake_case key for this slab (e.g. "within_24h").
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionSlab::Within24h => "within_24h",
            CompletionSlab::Within48h => "within_48h",
            CompletionSlab::Within72h => "within_72h",
            CompletionSlab::Within1Week => "within_1w",
        }
    }
}

impl fmt::Display for CompletionSlab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
