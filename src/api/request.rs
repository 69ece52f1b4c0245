//! Request types for the Rate Calculation Engine API.
//!
//! This module defines the JSON request structures for the calculation and
//! policy administration endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::RateRequest;
use crate::models::{CompletionSlab, NewRateCard, RateCardUpdate, Tier};

/// Request body for the `/calculate` endpoint.
///
/// Optional fields default to "not applicable": a missing quality score is
/// never treated as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The case's postal code.
    pub postal_code: String,
    /// The pre-resolved completion slab.
    pub slab: CompletionSlab,
    /// Client scope for rate card lookup.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Overrides the rate card's base rate when present.
    #[serde(default)]
    pub base_rate_override: Option<Decimal>,
    /// Worker quality score, nominally in [0, 1].
    #[serde(default)]
    pub quality_score: Option<Decimal>,
    /// Market demand level, nominally in [0, 1].
    #[serde(default)]
    pub demand_level: Option<Decimal>,
    /// Travel distance to the case, in kilometres.
    #[serde(default)]
    pub distance_km: Option<Decimal>,
}

/// Request body for creating a rate card row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRateCardRequest {
    /// The pincode tier to price.
    pub tier: Tier,
    /// The completion slab to price.
    pub slab: CompletionSlab,
    /// Client scope. Absent creates a global row.
    #[serde(default)]
    pub client_id: Option<String>,
    /// The base payable rate. Must be positive.
    pub base_rate: Decimal,
    /// Flat travel allowance.
    #[serde(default)]
    pub travel_allowance: Decimal,
    /// Flat bonus.
    #[serde(default)]
    pub bonus: Decimal,
    /// The actor creating this row.
    pub created_by: String,
}

/// Request body for updating a rate card row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRateCardRequest {
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

impl From<CalculationRequest> for RateRequest {
    fn from(req: CalculationRequest) -> Self {
        RateRequest {
            postal_code: req.postal_code,
            slab: req.slab,
            client_id: req.client_id,
            base_rate_override: req.base_rate_override,
            quality_score: req.quality_score,
            demand_level: req.demand_level,
            distance_km: req.distance_km,
        }
    }
}

impl From<CreateRateCardRequest> for NewRateCard {
    fn from(req: CreateRateCardRequest) -> Self {
        NewRateCard {
            tier: req.tier,
            slab: req.slab,
            client_id: req.client_id,
            base_rate: req.base_rate,
            travel_allowance: req.travel_allowance,
            bonus: req.bonus,
            created_by: req.created_by,
        }
    }
}

impl From<UpdateRateCardRequest> for RateCardUpdate {
    fn from(req: UpdateRateCardRequest) -> Self {
        RateCardUpdate {
            base_rate: req.base_rate,
            travel_allowance: req.travel_allowance,
            bonus: req.bonus,
            updated_by: req.updated_by,
        }
    }
}
