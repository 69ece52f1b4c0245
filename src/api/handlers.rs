//! HTTP request handlers for the Rate Calculation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{RateRequest, calculate_rate};
use crate::config::DynamicPricingConfig;

use super::request::{CalculationRequest, CreateRateCardRequest, UpdateRateCardRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route(
            "/rate-cards",
            get(list_rate_cards_handler).post(create_rate_card_handler),
        )
        .route(
            "/rate-cards/:id",
            put(update_rate_card_handler).delete(deactivate_rate_card_handler),
        )
        .route(
            "/config/dynamic-pricing",
            get(get_dynamic_config_handler).put(put_dynamic_config_handler),
        )
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Accepts a calculation request and returns the itemized rate result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let request: RateRequest = request.into();
    let snapshot = state.store().snapshot();

    match calculate_rate(&request, &snapshot) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                postal_code = %request.postal_code,
                tier = %result.breakdown.pincode_tier,
                slab = %result.breakdown.completion_slab,
                total_rate = %result.total_rate,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Query parameters for listing rate cards.
#[derive(Debug, Deserialize)]
struct ListRateCardsParams {
    /// Include deactivated history rows when true.
    #[serde(default)]
    include_inactive: bool,
}

/// Handler for GET /rate-cards.
async fn list_rate_cards_handler(
    State(state): State<AppState>,
    Query(params): Query<ListRateCardsParams>,
) -> impl IntoResponse {
    let rows = if params.include_inactive {
        state.store().all_rows()
    } else {
        state.store().rows()
    };
    Json(rows)
}

/// Handler for POST /rate-cards.
async fn create_rate_card_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateRateCardRequest>,
) -> impl IntoResponse {
    match state.store().create_row(request.into()) {
        Ok(row) => (StatusCode::CREATED, Json(row)).into_response(),
        Err(err) => {
            warn!(error = %err, "Rate card creation failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for PUT /rate-cards/:id.
async fn update_rate_card_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRateCardRequest>,
) -> impl IntoResponse {
    match state.store().update_row(id, request.into()) {
        Ok(row) => Json(row).into_response(),
        Err(err) => {
            warn!(row_id = %id, error = %err, "Rate card update failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Query parameters for deactivating a rate card.
#[derive(Debug, Deserialize)]
struct DeactivateParams {
    /// The actor recorded on the deactivation.
    actor: Option<String>,
}

/// Handler for DELETE /rate-cards/:id.
///
/// Deactivation is a soft delete: the row stays as history.
async fn deactivate_rate_card_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeactivateParams>,
) -> impl IntoResponse {
    let actor = params.actor.as_deref().unwrap_or("admin");
    match state.store().deactivate_row(id, actor) {
        Ok(row) => Json(row).into_response(),
        Err(err) => {
            warn!(row_id = %id, error = %err, "Rate card deactivation failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for GET /config/dynamic-pricing.
async fn get_dynamic_config_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.store().dynamic_config();
    Json((*config).clone())
}

/// Handler for PUT /config/dynamic-pricing.
///
/// Replaces the configuration whole; fields are never merged.
async fn put_dynamic_config_handler(
    State(state): State<AppState>,
    Json(config): Json<DynamicPricingConfig>,
) -> impl IntoResponse {
    match state.store().upsert_dynamic_config(config.clone()) {
        Ok(()) => {
            info!("Dynamic pricing config replaced");
            Json(config).into_response()
        }
        Err(err) => {
            warn!(error = %err, "Dynamic pricing config update failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}
