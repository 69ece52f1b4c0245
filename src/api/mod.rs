//! HTTP API module for the Rate Calculation Engine.
//!
//! This module provides the REST endpoints for calculating case rates and
//! administering rate card rows and the dynamic pricing configuration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, CreateRateCardRequest, UpdateRateCardRequest};
pub use response::ApiError;
pub use state::AppState;
