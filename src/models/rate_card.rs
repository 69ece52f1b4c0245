//! Rate card models.
//!
//! This module defines the persisted rate card row keyed by (tier, slab,
//! optional client), plus the create/update payloads used by the policy
//! store's administrative operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{CompletionSlab, Tier};

/// A stored pricing record for one (tier, slab, optional client) combination.
///
/// Rows are never hard-deleted: deactivation flips `is_active` so that
/// already-computed payouts keep an auditable policy trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCardRow {
    /// Unique identifier for this row.
    pub id: Uuid,
    /// The pincode tier this row prices.
    pub tier: Tier,
    /// The completion slab this row prices.
    pub slab: CompletionSlab,
    /// Client scope. `None` means the row applies globally.
    #[serde(default)]
    pub client_id: Option<String>,
    /// The base payable rate before multipliers. Must be positive.
    pub base_rate: Decimal,
    /// Flat travel allowance, never scaled by multipliers.
    pub travel_allowance: Decimal,
    /// Flat bonus added on top of the slab's percentage bonus.
    pub bonus: Decimal,
    /// Whether this row participates in lookups.
    pub is_active: bool,
    /// The actor that created this row.
    pub created_by: String,
    /// When this row was created.
    pub created_at: DateTime<Utc>,
    /// The actor that last modified this row.
    pub updated_by: String,
    /// When this row was last modified.
    pub updated_at: DateTime<Utc>,
}

impl RateCardRow {
    /// Returns true when this row is scoped to the given client lookup.
    ///
    /// A global row (no client) matches any lookup; a client row matches
    /// only lookups for that client.
    pub fn matches_client(&self, client: Option<&str>) -> bool {
        match (&self.client_id, client) {
            (None, _) => true,
            (Some(own), Some(requested)) => own == requested,
            (Some(_), None) => false,
        }
    }
}

/// Payload for creating a new rate card row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRateCard {
    /// The pincode tier to price.
    pub tier: Tier,
    /// The completion slab to price.
    pub slab: CompletionSlab,
    /// Client scope. `None` creates a global row.
    #[serde(default)]
    pub client_id: Option<String>,
    /// The base payable rate. Must be positive.
    pub base_rate: Decimal,
    /// Flat travel allowance. Must not be negative.
    #[serde(default)]
    pub travel_allowance: Decimal,
    /// Flat bonus. Must not be negative.
    #[serde(default)]
    pub bonus: Decimal,
    /// The actor creating this row.
    pub created_by: String,
}

/// Validates the monetary fields of a rate card row.
pub(crate) fn validate_amounts(
    base_rate: Decimal,
    travel_allowance: Decimal,
    bonus: Decimal,
) -> EngineResult<()> {
    if base_rate <= Decimal::ZERO {
        return Err(EngineError::InvalidRateRow {
            field: "base_rate".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if travel_allowance < Decimal::ZERO {
        return Err(EngineError::InvalidRateRow {
            field: "travel_allowance".to_string(),
            message: "must not be negative".to_string(),
        });
    }
    if bonus < Decimal::ZERO {
        return Err(EngineError::InvalidRateRow {
            field: "bonus".to_string(),
            message: "must not be negative".to_string(),
        });
    }
    Ok(())
}

impl NewRateCard {
    /// Validates the monetary fields of this payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRateRow` when `base_rate` is not positive or when
    /// `travel_allowance` or `bonus` is negative.
    pub fn validate(&self) -> EngineResult<()> {
        validate_amounts(self.base_rate, self.travel_allowance, self.bonus)
    }

    /// Consumes the payload and produces a fresh active row.
    pub fn into_row(self) -> RateCardRow {
        let now = Utc::now();
        let actor = self.created_by;
        RateCardRow {
            id: Uuid::new_v4(),
            tier: self.tier,
            slab: self.slab,
            client_id: self.client_id,
            base_rate: self.base_rate,
            travel_allowance: self.travel_allowance,
            bonus: self.bonus,
            is_active: true,
            created_by: actor.clone(),
            created_at: now,
            updated_by: actor,
            updated_at: now,
        }
    }
}

/// Payload for updating an existing rate card row.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateCardUpdate {
    /// New base rate, if changing.
    #[serde(default)]
    pub base_rate: Option<Decimal>,
    /// New travel allowance, if changing.
    #[serde(default)]
    pub travel_allowance: Option<Decimal>,
    /// New flat bonus, if changing.
    #[serde(default)]
    pub bonus: Option<Decimal>,
    /// The actor applying this update.
    pub updated_by: String,
}
